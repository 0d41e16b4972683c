pub const BLOCK_TEMPLATE: &str =
    "<div class=box><!-- item --><span title=\"a &amp; b\">hello</span><img src=x /></div>";

pub fn make_blocks(blocks: usize) -> String {
    let mut html = String::with_capacity(BLOCK_TEMPLATE.len() * blocks);
    for _ in 0..blocks {
        html.push_str(BLOCK_TEMPLATE);
    }
    html
}

/// One large `script` element whose body is dense with near-miss close tags.
pub fn make_script_adversarial(bytes: usize) -> String {
    let mut html = String::with_capacity(bytes + 32);
    html.push_str("<script>");
    while html.len() < bytes {
        html.push_str("</scri<pt");
    }
    html.push_str("</script>");
    html
}
