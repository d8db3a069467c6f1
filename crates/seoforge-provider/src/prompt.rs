//! Prompt construction for the generative service.

/// Prompt asking for a complete site document.
#[must_use]
pub fn site(site_name: &str, site_keywords: &str) -> String {
    format!(
        "You are an expert SEO content strategist and web designer.\n\
         Generate a complete data structure for a professional, SEO-optimized website.\n\
         The site name is \"{site_name}\".\n\
         The primary keywords for the site are: \"{site_keywords}\".\n\
         \n\
         Please provide the following:\n\
         1. A slightly refined or creative version of the site name if you think it's better.\n\
         2. A theme color from the allowed options. Pick one that best fits the keywords.\n\
         3. A set of standard pages. I need a Home page ('/'), an About page ('/about'), \
         and a Blog page ('/blog').\n\
         4. For each page, provide a path, a title, and content. The content should be \
         well-written, engaging, and optimized for the given keywords. Use Markdown for \
         formatting. For the blog page, the content should be a brief introduction to what \
         the blog is about.\n\
         5. For the Blog page, generate 3 initial, high-quality, SEO-friendly articles \
         related to the site keywords. Each article needs a URL-friendly slug, a compelling \
         title, a meta description (around 150 characters), and full content in Markdown \
         format. The content should be substantial and well-structured with headings and \
         lists.\n\
         \n\
         Adhere strictly to the provided JSON schema for the response.\n"
    )
}

/// Prompt asking for three new articles, steering away from existing
/// titles.
#[must_use]
pub fn articles(article_keywords: &str, exclude_titles: &[String]) -> String {
    let exclusions = exclude_titles
        .iter()
        .map(|t| format!("- \"{t}\""))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert SEO content writer.\n\
         Your task is to generate 3 new, high-quality, SEO-friendly blog articles.\n\
         The articles should be based on the following keywords: \"{article_keywords}\".\n\
         \n\
         IMPORTANT: Do NOT generate articles with titles that are similar to the following \
         existing titles:\n\
         {exclusions}\n\
         \n\
         For each of the 3 articles, provide:\n\
         1. A URL-friendly slug based on the title.\n\
         2. A compelling and unique title.\n\
         3. A short, SEO-friendly meta description (around 150 characters).\n\
         4. Full article content in Markdown format. The content should be substantial, \
         well-structured with headings (##, ###) and lists (*), and provide real value to \
         the reader.\n\
         \n\
         Adhere strictly to the provided JSON schema for the response.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_prompt_carries_brief() {
        let prompt = site("Eco Living", "sustainability, lifestyle");
        assert!(prompt.contains("\"Eco Living\""));
        assert!(prompt.contains("sustainability, lifestyle"));
        assert!(prompt.contains("'/blog'"));
    }

    #[test]
    fn test_articles_prompt_lists_exclusions() {
        let titles = vec!["Green Homes".to_string(), "Zero Waste".to_string()];
        let prompt = articles("recycling", &titles);
        assert!(prompt.contains("- \"Green Homes\""));
        assert!(prompt.contains("- \"Zero Waste\""));
        assert!(prompt.contains("\"recycling\""));
    }
}
