//! Avatar URL resolution.
//!
//! # Responsibility
//! - Decide whether user-supplied avatar input is usable as an image URL.
//! - Substitute a placeholder from the fixed product set when it is not.
//!
//! # Invariants
//! - URL-shaped input passes through byte-for-byte unchanged.
//! - Substituted values are always members of `PLACEHOLDER_AVATARS`.
//! - Substitution is reported to the caller; it is not an error.

use rand::Rng;

/// Fixed product set of fallback avatar images.
pub const PLACEHOLDER_AVATARS: &[&str] = &[
    "https://i.pinimg.com/736x/36/1f/da/361fda0acb56e462fa612acea350fe5d.jpg",
    "https://zonacuriosa.com/wp-content/uploads/2021/03/curiosidades-incriveis-sobre-monstros-sa-2.jpg",
    "https://th.bing.com/th/id/R.4dd4620de56680245fcd67dc1d8f480c?rik=3sGhgCl7TUb6fg&riu=http%3a%2f%2fimg.lum.dolimg.com%2fv1%2fimages%2fgallery_walle__0011_12_72bf2194.jpeg%3fregion%3d0%252C0%252C1580%252C880&ehk=MLSxWnJBkPhW69A3kxUEPOY7T9My3wmGatu%2fyCg7QJ8%3d&risl=&pid=ImgRaw&r=0",
    "https://th.bing.com/th/id/R.dbc2e333f9bad75c0f4d6b86b58170de?rik=k%2byUatVUyL9cYQ&pid=ImgRaw&r=0",
    "https://tse3.mm.bing.net/th/id/OIP.pCVeLbQIfDQKYHVU2re3vwHaEK?r=0&rs=1&pid=ImgDetMain&o=7&rm=3",
];

/// Outcome of avatar resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarResolution {
    /// Usable avatar URL: the input itself, or a placeholder.
    pub url: String,
    /// True when the input was replaced by a placeholder.
    pub used_placeholder: bool,
}

/// Returns whether the input is shaped like a web URL.
///
/// The only check performed is the scheme prefix; no further URL parsing,
/// reachability or content inspection happens anywhere in the product.
pub fn is_url_shaped(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}

/// Resolves user-supplied avatar input into a usable URL.
///
/// Non-URL-shaped input (including the empty string) is replaced by one
/// member of [`PLACEHOLDER_AVATARS`] chosen uniformly at random, and the
/// substitution is flagged so the caller can notify the user.
pub fn resolve_avatar(raw: &str) -> AvatarResolution {
    if is_url_shaped(raw) {
        return AvatarResolution {
            url: raw.to_string(),
            used_placeholder: false,
        };
    }

    let index = rand::thread_rng().gen_range(0..PLACEHOLDER_AVATARS.len());
    AvatarResolution {
        url: PLACEHOLDER_AVATARS[index].to_string(),
        used_placeholder: true,
    }
}
