//! HTML sanitization for notebook-provided markup.
//!
//! Untrusted HTML and SVG from outputs go through a single allow-list policy
//! built on ammonia's defaults: scripts, event handlers, `style` and frames
//! are removed, links get `rel="noopener noreferrer"`, and a small set of SVG
//! drawing elements is permitted so that plots survive. `data:` URLs are
//! accepted only for raster images in `<img src>`.

use std::borrow::Cow;
use std::sync::OnceLock;

use ammonia::Builder;

/// SVG elements kept by the policy. Elements that can reference external or
/// scripted content (`use`, `image`, `foreignObject`, `script`, `style`,
/// `animate`) are not listed.
const SVG_TAGS: &[&str] = &[
    "svg", "g", "path", "rect", "circle", "ellipse", "line", "polyline", "polygon", "text",
    "tspan", "title", "desc",
];

/// Presentation attributes allowed on every SVG element.
const SVG_PRESENTATION_ATTRIBUTES: &[&str] = &[
    "fill",
    "fill-opacity",
    "fill-rule",
    "stroke",
    "stroke-width",
    "stroke-opacity",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-dasharray",
    "opacity",
    "transform",
    "font-family",
    "font-size",
    "font-weight",
    "text-anchor",
    "dominant-baseline",
];

/// Geometry attributes per SVG element.
const SVG_GEOMETRY_ATTRIBUTES: &[(&str, &[&str])] = &[
    (
        "svg",
        &["width", "height", "viewBox", "preserveAspectRatio", "version", "xmlns"],
    ),
    ("path", &["d"]),
    ("rect", &["x", "y", "width", "height", "rx", "ry"]),
    ("circle", &["cx", "cy", "r"]),
    ("ellipse", &["cx", "cy", "rx", "ry"]),
    ("line", &["x1", "y1", "x2", "y2"]),
    ("polyline", &["points"]),
    ("polygon", &["points"]),
    ("text", &["x", "y", "dx", "dy"]),
    ("tspan", &["x", "y", "dx", "dy"]),
];

/// Attributes whose values are URLs.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "cite", "longdesc", "action", "srcset"];

/// Raster image types allowed inline as `data:` URLs.
const DATA_IMAGE_PREFIXES: &[&str] = &[
    "data:image/png",
    "data:image/jpeg",
    "data:image/jpg",
    "data:image/gif",
    "data:image/webp",
];

/// Whether a URL is an inline raster image.
pub(crate) fn is_data_image_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    DATA_IMAGE_PREFIXES.iter().any(|prefix| {
        lower
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(';') || rest.starts_with(','))
    })
}

/// Drop `data:` URLs everywhere except raster images in `<img src>`.
fn filter_data_urls<'u>(element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    let is_data_url = URL_ATTRIBUTES.contains(&attribute)
        && value.trim_start().to_ascii_lowercase().starts_with("data:");

    if is_data_url && !(element == "img" && attribute == "src" && is_data_image_url(value)) {
        log::debug!("dropping data URL from <{} {}>", element, attribute);
        return None;
    }
    Some(Cow::Borrowed(value))
}

fn build_policy() -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .add_tags(SVG_TAGS.iter().copied())
        .add_url_schemes(["data"])
        .attribute_filter(filter_data_urls);

    for tag in SVG_TAGS {
        builder.add_tag_attributes(*tag, SVG_PRESENTATION_ATTRIBUTES.iter().copied());
    }
    for (tag, attributes) in SVG_GEOMETRY_ATTRIBUTES {
        builder.add_tag_attributes(*tag, attributes.iter().copied());
    }
    builder
}

fn policy() -> &'static Builder<'static> {
    static POLICY: OnceLock<Builder<'static>> = OnceLock::new();
    POLICY.get_or_init(build_policy)
}

/// Sanitize an HTML (or inline SVG) fragment.
///
/// Applying this to its own output returns the same string.
pub fn sanitize_html(html: &str) -> String {
    policy().clean(html).to_string()
}
