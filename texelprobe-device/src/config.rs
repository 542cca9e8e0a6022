//! Display config selection.
//!
//! EGL returns every config satisfying the requested attributes; the probe
//! additionally needs the config whose native visual id matches the GBM
//! surface format, otherwise `eglCreateWindowSurface` rejects the pairing.

use khronos_egl as egl;

/// Attributes every candidate config must satisfy. Alpha is pinned to zero
/// to match the XRGB layout of the scanout surface.
pub(crate) const CONFIG_ATTRIBUTES: [egl::Int; 13] = [
    egl::SURFACE_TYPE,
    egl::WINDOW_BIT,
    egl::RED_SIZE,
    8,
    egl::GREEN_SIZE,
    8,
    egl::BLUE_SIZE,
    8,
    egl::ALPHA_SIZE,
    0,
    egl::RENDERABLE_TYPE,
    egl::OPENGL_ES3_BIT,
    egl::NONE,
];

pub(crate) const CONTEXT_ATTRIBUTES: [egl::Int; 3] =
    [egl::CONTEXT_CLIENT_VERSION, 3, egl::NONE];

/// Scan visual ids in enumeration order and return the index of the first
/// entry equal to `target`. Entries whose attribute query failed are `None`
/// and are skipped, as the underlying `eglGetConfigAttrib` loop does.
pub(crate) fn match_visual<I>(visual_ids: I, target: u32) -> Option<usize>
where
    I: IntoIterator<Item = Option<u32>>,
{
    visual_ids
        .into_iter()
        .position(|id| id == Some(target))
}

#[cfg(test)]
mod tests {
    use super::match_visual;

    const XRGB8888: u32 = 0x3432_5258;
    const ARGB8888: u32 = 0x3432_5241;

    #[test]
    fn single_match_returns_its_index() {
        let ids = [Some(ARGB8888), Some(XRGB8888), Some(0x1234)];
        assert_eq!(match_visual(ids, XRGB8888), Some(1));
    }

    #[test]
    fn no_match_returns_none() {
        let ids = [Some(ARGB8888), Some(0x1234)];
        assert_eq!(match_visual(ids, XRGB8888), None);
        assert_eq!(match_visual([], XRGB8888), None);
    }

    #[test]
    fn multiple_matches_return_the_first_in_enumeration_order() {
        let ids = [Some(ARGB8888), Some(XRGB8888), Some(XRGB8888)];
        assert_eq!(match_visual(ids, XRGB8888), Some(1));
    }

    #[test]
    fn failed_attribute_queries_are_skipped() {
        let ids = [None, Some(XRGB8888)];
        assert_eq!(match_visual(ids, XRGB8888), Some(1));

        let ids = [None, None];
        assert_eq!(match_visual(ids, XRGB8888), None);
    }
}
