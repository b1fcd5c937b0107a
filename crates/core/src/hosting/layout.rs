//! Post body layout: lead image selection and image interleaving.

/// Make the second image the lead image.
///
/// The first scraped image is frequently a low-resolution thumbnail, so the
/// second one is sent first. Lists shorter than two are returned unchanged.
pub fn promote_second_image(images: &[String]) -> Vec<String> {
    let mut ordered = images.to_vec();
    if ordered.len() >= 2 {
        ordered.swap(0, 1);
    }
    ordered
}

/// One unit of the laid-out post body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutBlock<'a> {
    Paragraph(&'a str),
    /// `position` is 1-based and used for the caption.
    Image { position: usize, url: &'a str },
}

/// Spread images across the paragraphs of `content`.
///
/// Paragraphs are the non-empty trimmed chunks between blank lines. With
/// `N` paragraphs and `M` images, the stride is `max(1, N / M)`; the next
/// image follows paragraph `i` (0-based) when `(i + 1) % stride == 0` or `i`
/// is the last paragraph. Images left over after the last paragraph are
/// appended in order. Every image appears exactly once and keeps its order.
pub fn interleave_images<'a>(content: &'a str, images: &'a [String]) -> Vec<LayoutBlock<'a>> {
    let paragraphs: Vec<&str> = content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut blocks = Vec::with_capacity(paragraphs.len() + images.len());
    let mut pending = images.iter().enumerate();

    if images.is_empty() {
        blocks.extend(paragraphs.into_iter().map(LayoutBlock::Paragraph));
        return blocks;
    }

    let stride = (paragraphs.len() / images.len()).max(1);
    let last = paragraphs.len().saturating_sub(1);

    for (i, paragraph) in paragraphs.iter().copied().enumerate() {
        blocks.push(LayoutBlock::Paragraph(paragraph));

        if (i + 1) % stride == 0 || i == last {
            if let Some((idx, url)) = pending.next() {
                blocks.push(LayoutBlock::Image {
                    position: idx + 1,
                    url,
                });
            }
        }
    }

    blocks.extend(pending.map(|(idx, url)| LayoutBlock::Image {
        position: idx + 1,
        url,
    }));

    blocks
}

/// Render the HTML body submitted to the hosting service.
///
/// Without images the content is sent untouched.
pub fn render_post_html(content: &str, images: &[String]) -> String {
    if images.is_empty() {
        return content.to_string();
    }

    interleave_images(content, images)
        .into_iter()
        .map(|block| match block {
            LayoutBlock::Paragraph(text) => text.to_string(),
            LayoutBlock::Image { position, url } => image_block(position, url),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn image_block(position: usize, url: &str) -> String {
    format!(
        r#"<div style="text-align: center; margin: 20px 0;">
  <img src="{url}" alt="Blog image {n}" style="max-width: 100%; height: auto; border-radius: 8px; box-shadow: 0 4px 8px rgba(0,0,0,0.1);" />
  <p style="font-size: 12px; color: #666; margin-top: 8px; font-style: italic;">Image {n}</p>
</div>"#,
        url = ammonia::clean_text(url),
        n = position
    )
}
