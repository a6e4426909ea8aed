// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_chat_reply(size: usize) -> String {
    let base = "## Section\n\nParagraph with **bold**, `code` and a mention of @Opta Max.\n\n- Bullet point\n  - Nested item\n- Another item\n\n| Name | Score |\n| :--- | ---: |\n| Ada | 10 |\n| Bob | 12 |\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_collapsibles(depth: usize) -> String {
    let mut content = String::from("innermost paragraph");
    for level in 0..depth {
        content = format!(
            "<details>\n<summary>Level {level}</summary>\n\nText at level {level}.\n\n{content}\n</details>"
        );
    }
    content
}

/// Growing prefixes, `step` bytes apart, as a streaming renderer would see them.
#[allow(dead_code)]
pub fn prefixes(content: &str, step: usize) -> Vec<&str> {
    (step..=content.len())
        .step_by(step)
        .filter(|&end| content.is_char_boundary(end))
        .map(|end| &content[..end])
        .collect()
}
