//! Show a single post

use anyhow::{bail, Result};

use crate::content::{Post, PostRepository};
use crate::Cms;

/// How a post is looked up
#[derive(Debug, Clone, Copy)]
pub enum PostRef<'a> {
    Id(&'a str),
    Slug(&'a str),
}

/// Print one post. With `track`, the lookup also counts as a view.
pub fn run(cms: &mut Cms, post_ref: PostRef<'_>, track: bool, json: bool) -> Result<()> {
    let found = match post_ref {
        PostRef::Id(id) => cms.posts.get_by_id(id),
        PostRef::Slug(slug) => cms.posts.get_by_slug(slug),
    };
    let Some(mut post) = found else {
        bail!("Post not found: {:?}", post_ref);
    };

    if track {
        if let Some(views) = cms.posts.increment_views(&post.id) {
            post.views = views;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", render_post(cms, &post));
    }
    Ok(())
}

/// Header block followed by the markdown body
pub fn render_post(cms: &Cms, post: &Post) -> String {
    let mut out = format!("{}\n", post.title);
    out.push_str(&format!("  id:        {}\n", post.id));
    out.push_str(&format!("  url:       {}\n", cms.post_url(post)));
    out.push_str(&format!("  status:    {}\n", post.status));
    out.push_str(&format!("  category:  {}\n", post.category));
    out.push_str(&format!("  author:    {}\n", post.author));
    out.push_str(&format!("  published: {}\n", post.publish_date.to_rfc3339()));
    out.push_str(&format!("  updated:   {}\n", post.updated_at.to_rfc3339()));
    out.push_str(&format!("  views:     {}\n", post.views));
    if let Some(image) = &post.image {
        out.push_str(&format!(
            "  image:     {} ({})\n",
            image,
            post.image_alt.as_deref().unwrap_or("no alt text")
        ));
    }
    if !post.excerpt.is_empty() {
        out.push_str(&format!("\n{}\n", post.excerpt));
    }
    out.push_str(&format!("\n{}\n", post.content.trim_end()));
    out
}
