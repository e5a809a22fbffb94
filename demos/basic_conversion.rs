//! Basic conversion example demonstrating the transcoder

use static_site_tools::html_to_markdown;

fn main() {
    println!("=== Static Site Tools - Basic Examples ===\n");

    show(
        "Heading and paragraph",
        "<h1>Welcome</h1><p>This is a test document.</p>",
    );
    show(
        "Inline formatting",
        "<p><strong>Bold</strong>, <em>italic</em> and <code>code</code>.</p>",
    );
    show(
        "Links and images",
        r#"<a href="https://example.com">Example</a> <img src="logo.png" alt="Logo">"#,
    );
    show("Code block", "<pre><code>fn main() {}</code></pre>");
    show("List", "<ul><li>first</li><li>second</li></ul>");
}

fn show(label: &str, html: &str) {
    println!("{label}");
    println!("Input HTML:");
    println!("{html}\n");
    println!("Output Markdown:");
    println!("{}", html_to_markdown(html));
    println!("---\n");
}
