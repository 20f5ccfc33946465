//! List posts and categories

use anyhow::Result;

use crate::content::{Post, PostFilter};
use crate::helpers::format_date;
use crate::Cms;

/// List posts matching `filter`, falling back to the configured page size
pub fn run(cms: &Cms, mut filter: PostFilter, json: bool) -> Result<()> {
    if filter.limit.is_none() {
        filter.limit = Some(cms.config.per_page);
    }

    let total = cms.posts.count(&filter);
    let posts = cms.posts.query(&filter);
    tracing::debug!("Listing {} of {} posts", posts.len(), total);

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
    } else {
        print!("{}", render_posts(&posts, total));
    }
    Ok(())
}

/// One line per post: date, status, id, title, category
pub fn render_posts(posts: &[&Post], total: usize) -> String {
    let mut out = format!("Posts ({} of {}):\n", posts.len(), total);
    for post in posts {
        out.push_str(&format!(
            "  {} [{}] {} - {} ({}, {} views)\n",
            format_date(&post.publish_date, "YYYY-MM-DD"),
            post.status,
            post.id,
            post.title,
            post.category,
            post.views
        ));
    }
    out
}

/// Print categories with their post counts
pub fn categories(cms: &Cms, json: bool) -> Result<()> {
    let categories = cms.posts.categories();

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    println!("Categories ({}):", categories.len());
    for category in categories {
        println!("  {} [{}] ({})", category.name, category.slug, category.count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PostRepository, PostStatus, SeedData};

    #[test]
    fn test_render_posts() {
        let (posts, _) = SeedData::builtin().unwrap().into_stores().unwrap();
        let filter = PostFilter::new().status(PostStatus::Published);
        let listed = posts.query(&filter);

        let out = render_posts(&listed, posts.count(&filter));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Posts (2 of 2):");
        assert_eq!(
            lines[1],
            "  2024-02-01 [published] 2 - How We Verify Records (methodology, 45 views)"
        );
        assert!(lines[2].contains("Honoring the Names"));
        assert_eq!(posts.get_by_id("2").unwrap().views, 45);
    }
}
