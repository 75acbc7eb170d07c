pub const SIDEBAR_COLLAPSED_CLASS: &str = "collapsed";
pub const CONTENT_EXPANDED_CLASS: &str = "expanded";
pub const MOBILE_CLASS: &str = "mobile";

/// Class flags shared by the sidebar and the content wrapper.
///
/// Collapse and mobile are independent: resizing never touches the
/// collapsed flag and toggling never touches the mobile flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarLayout {
    pub collapsed: bool,
    pub mobile: bool,
}

impl SidebarLayout {
    /// Layout as the server rendered it.
    pub fn rendered(collapsed: bool) -> Self {
        Self {
            collapsed,
            mobile: false,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }

    /// Returns true when the mobile flag changed.
    pub fn apply_viewport_width(&mut self, width: f64, breakpoint_px: u32) -> bool {
        let mobile = width < f64::from(breakpoint_px);
        let changed = mobile != self.mobile;
        self.mobile = mobile;
        changed
    }

    /// The only classes a resize may write, on both the sidebar and the
    /// content wrapper.
    pub fn mobile_classes(&self) -> [(&'static str, bool); 1] {
        [(MOBILE_CLASS, self.mobile)]
    }

    /// Classes a toggle writes on the sidebar; the mobile class is left
    /// to resizes.
    pub fn sidebar_classes(&self) -> [(&'static str, bool); 1] {
        [(SIDEBAR_COLLAPSED_CLASS, self.collapsed)]
    }

    pub fn content_classes(&self) -> [(&'static str, bool); 1] {
        [(CONTENT_EXPANDED_CLASS, self.collapsed)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_sidebar_and_content_together() {
        let mut layout = SidebarLayout::default();
        assert!(layout.toggle());
        assert_eq!(layout.sidebar_classes()[0], ("collapsed", true));
        assert_eq!(layout.content_classes()[0], ("expanded", true));
        assert!(!layout.toggle());
        assert_eq!(layout.content_classes()[0], ("expanded", false));
    }

    #[test]
    fn breakpoint_is_exclusive() {
        let mut layout = SidebarLayout::default();
        assert!(layout.apply_viewport_width(767.0, 768));
        assert!(layout.mobile);
        assert!(layout.apply_viewport_width(768.0, 768));
        assert!(!layout.mobile);
        assert!(!layout.apply_viewport_width(1024.0, 768));
    }

    #[test]
    fn toggle_never_writes_the_mobile_class() {
        let mut layout = SidebarLayout::default();
        layout.apply_viewport_width(320.0, 768);
        layout.toggle();
        assert_eq!(layout.sidebar_classes(), [("collapsed", true)]);
        assert_eq!(layout.content_classes(), [("expanded", true)]);
        assert_eq!(layout.mobile_classes(), [("mobile", true)]);
    }

    #[test]
    fn resize_writes_only_mobile_and_keeps_rendered_collapse() {
        let mut layout = SidebarLayout::rendered(true);
        assert!(layout.apply_viewport_width(500.0, 768));
        assert_eq!(layout.mobile_classes(), [("mobile", true)]);
        assert_eq!(layout.sidebar_classes()[0], ("collapsed", true));
        assert_eq!(layout.content_classes()[0], ("expanded", true));

        assert!(layout.apply_viewport_width(1024.0, 768));
        assert_eq!(layout.mobile_classes(), [("mobile", false)]);
        assert!(layout.collapsed);
    }
}
