use std::collections::HashSet;
use std::fs;
use std::path::Path;

use mwblog::config::SiteConfig;
use mwblog::error::ContentError;
use mwblog::Blog;
use tempfile::TempDir;

fn write_post(blog: &Blog, name: &str, content: &str) {
    fs::create_dir_all(&blog.posts_dir).unwrap();
    fs::write(blog.posts_dir.join(name), content).unwrap();
}

fn post(title: &str, date: &str, body: &str) -> String {
    format!("---\ntitle: {}\ndate: {}\n---\n{}", title, date, body)
}

fn site() -> (TempDir, Blog) {
    let dir = TempDir::new().unwrap();
    let blog = Blog::with_config(dir.path(), SiteConfig::default());
    (dir, blog)
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn routes_and_posts_cover_every_document() {
    let (_dir, blog) = site();
    write_post(&blog, "hello-world.md", &post("Hello World", "2021-01-05", "# Hi\n"));
    write_post(&blog, "later.mdx", &post("Later", "2021-06-01", "Body\n"));
    write_post(&blog, "middle.markdown", &post("Middle", "2021-03-10 08:00", "Body\n"));

    let routes = blog.list_routes().unwrap();
    let ids: HashSet<_> = routes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(routes.len(), 3);
    assert_eq!(ids, HashSet::from(["hello-world", "later", "middle"]));

    let posts = blog.list_posts().unwrap();
    assert_eq!(posts.len(), routes.len());
    let dates: Vec<_> = posts.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["2021-06-01", "2021-03-10 08:00", "2021-01-05"]);
    for pair in posts.windows(2) {
        assert!(pair[0].published >= pair[1].published);
    }
}

#[test]
fn summary_merges_identifier_with_metadata() {
    let (_dir, blog) = site();
    write_post(
        &blog,
        "hello-world.md",
        "---\ntitle: Hello World\ndate: 2021-01-05\ncover: hero.png\n---\n# Hi\n",
    );

    let posts = blog.list_posts().unwrap();
    let json = serde_json::to_value(&posts[0]).unwrap();
    assert_eq!(json["id"], "hello-world");
    assert_eq!(json["title"], "Hello World");
    assert_eq!(json["date"], "2021-01-05");
    assert_eq!(json["cover"], "hero.png");
}

#[test]
fn unknown_identifiers_are_not_found() {
    let (_dir, blog) = site();
    write_post(&blog, "real.md", &post("Real", "2021-01-05", ""));

    for id in ["missing", "real.md", "../real", ""] {
        assert!(
            matches!(blog.render_post(id), Err(ContentError::NotFound(_))),
            "{id} should be not found"
        );
    }
}

#[test]
fn missing_store_is_unavailable() {
    let (_dir, blog) = site();
    assert!(matches!(
        blog.list_posts(),
        Err(ContentError::StoreUnavailable { .. })
    ));
    assert!(matches!(
        blog.list_routes(),
        Err(ContentError::StoreUnavailable { .. })
    ));
}

#[test]
fn build_writes_pages_index_and_sitemap() {
    let (_dir, blog) = site();
    write_post(
        &blog,
        "hello-world.md",
        &post(
            "Hello World",
            "2021-01-05",
            "# Hi\n\n```rust\nfn main() {}\n```\n",
        ),
    );
    write_post(&blog, "newer.md", &post("Newer", "2021-06-01", "Text\n"));

    blog.build().unwrap();

    let page = read_json(&blog.public_dir.join("posts/hello-world/index.json"));
    assert_eq!(page["id"], "hello-world");
    assert_eq!(page["front_matter"]["title"], "Hello World");
    assert_eq!(page["body"][1]["type"], "code_block");
    assert_eq!(page["body"][1]["language"], "rust");
    assert_eq!(page["body"][1]["code"], "fn main() {}");
    assert!(page["html"].as_str().unwrap().contains("class=\"highlight rust\""));

    let index = read_json(&blog.public_dir.join("index.json"));
    assert_eq!(index["posts"][0]["id"], "newer");
    assert_eq!(index["posts"][1]["id"], "hello-world");

    let sitemap = fs::read_to_string(blog.public_dir.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>https://mw.codes/posts/hello-world</loc>"));
    assert!(sitemap.contains("<loc>https://mw.codes/posts/newer</loc>"));

    let robots = fs::read_to_string(blog.public_dir.join("robots.txt")).unwrap();
    assert!(robots.contains("Sitemap: https://mw.codes/sitemap.xml"));

    blog.clean().unwrap();
    assert!(!blog.public_dir.exists());
}

#[test]
fn build_splits_large_sitemaps() {
    let dir = TempDir::new().unwrap();
    let mut config = SiteConfig::default();
    config.sitemap.size = 2;
    config.sitemap.robots_txt = false;
    let blog = Blog::with_config(dir.path(), config);

    for i in 1..=3 {
        write_post(&blog, &format!("p{}.md", i), &post("P", &format!("2021-01-0{}", i), ""));
    }

    blog.build().unwrap();

    // "/" plus three posts, two per file
    assert!(blog.public_dir.join("sitemap-0.xml").exists());
    assert!(blog.public_dir.join("sitemap-1.xml").exists());
    assert!(!blog.public_dir.join("robots.txt").exists());
    let index = fs::read_to_string(blog.public_dir.join("sitemap.xml")).unwrap();
    assert!(index.contains("<sitemapindex"));
    assert!(index.contains("https://mw.codes/sitemap-1.xml"));
}

#[test]
fn build_aborts_on_bad_front_matter() {
    let (_dir, blog) = site();
    write_post(&blog, "good.md", &post("Good", "2021-01-05", ""));
    write_post(&blog, "broken.md", "---\ntitle: Broken\n");

    let err = blog.build().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContentError>(),
        Some(ContentError::Parse { .. })
    ));
    assert!(!blog.public_dir.join("index.json").exists());
}

#[test]
fn new_post_scaffolds_and_refuses_overwrite() {
    let (_dir, blog) = site();

    let path = blog.new_post("Hello: World", None).unwrap();
    assert_eq!(path.file_name().unwrap(), "hello-world.md");

    let posts = blog.list_posts().unwrap();
    assert_eq!(posts[0].id, "hello-world");
    assert_eq!(posts[0].title, "Hello: World");

    assert!(blog.new_post("Hello World", None).is_err());

    write_post(&blog, "taken.mdx", &post("Taken", "2021-01-05", ""));
    assert!(blog.new_post("Other", Some("taken")).is_err());
}

#[test]
fn new_post_rejects_path_slugs() {
    let (dir, blog) = site();

    for slug in ["../../escaped", "nested/post", ".."] {
        assert!(blog.new_post("X", Some(slug)).is_err(), "{slug} should be rejected");
    }
    assert!(!dir.path().join("escaped.md").exists());
    assert!(!blog.posts_dir.join("nested").exists());
}

#[test]
fn new_post_propagates_store_errors() {
    let (_dir, blog) = site();
    write_post(&blog, "same.md", &post("Same", "2021-01-05", ""));
    write_post(&blog, "same.mdx", &post("Same", "2021-01-05", ""));

    let err = blog.new_post("Fresh", None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContentError>(),
        Some(ContentError::DuplicateIdentifier { .. })
    ));
    assert!(!blog.posts_dir.join("fresh.md").exists());
}

#[cfg(unix)]
#[test]
fn dangling_document_aborts_listing_and_build() {
    let (_dir, blog) = site();
    write_post(&blog, "ok.md", &post("Ok", "2021-01-05", ""));
    std::os::unix::fs::symlink(blog.posts_dir.join("missing.md"), blog.posts_dir.join("ghost.md"))
        .unwrap();

    assert!(matches!(blog.list_routes(), Err(ContentError::Read { .. })));
    assert!(matches!(blog.list_posts(), Err(ContentError::Read { .. })));
    assert!(blog.build().is_err());
    assert!(!blog.public_dir.join("index.json").exists());
}

#[test]
fn index_identifier_comes_from_file_name() {
    let (_dir, blog) = site();
    write_post(
        &blog,
        "real.md",
        "---\ntitle: A\ndate: 2021-01-05\nid: other\n---\n",
    );

    blog.build().unwrap();
    let raw = fs::read_to_string(blog.public_dir.join("index.json")).unwrap();
    assert_eq!(raw.matches("\"id\"").count(), 1);
    assert_eq!(read_json(&blog.public_dir.join("index.json"))["posts"][0]["id"], "real");
}
