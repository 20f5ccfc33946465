//! Create a new post

use anyhow::Result;

use crate::content::NewPost;
use crate::Cms;

/// Create a post and print it
///
/// The store lives only as long as the process, so the printed JSON is the
/// durable record.
pub fn run(cms: &mut Cms, new_post: NewPost) -> Result<()> {
    let post = cms.create_post(new_post);
    tracing::info!("Created post {} with slug {}", post.id, post.slug);

    if cms
        .posts
        .duplicate_slugs()
        .iter()
        .any(|(slug, _)| *slug == post.slug)
    {
        tracing::warn!("Slug {:?} is already used by another post", post.slug);
    }

    println!("{}", serde_json::to_string_pretty(&post)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CmsConfig;
    use crate::content::{InMemoryPostStore, PostRepository, PostStatus};
    use crate::settings::SettingsStore;

    #[test]
    fn test_run_adds_post_with_defaults() {
        let mut cms = Cms::from_parts(
            CmsConfig::default(),
            InMemoryPostStore::new(),
            SettingsStore::default(),
        );
        run(
            &mut cms,
            NewPost::new("A Night of Candles").with_status(PostStatus::Scheduled),
        )
        .unwrap();

        let post = cms.posts.get_by_slug("a-night-of-candles").unwrap();
        assert_eq!(post.author, "Admin");
        assert_eq!(post.category, "news");
        assert_eq!(post.status, PostStatus::Scheduled);
    }
}
