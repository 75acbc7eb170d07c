#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: Option<String>,
    pub active: bool,
}

impl NavLink {
    pub fn new(href: Option<&str>) -> Self {
        Self {
            href: href.map(ToString::to_string),
            active: false,
        }
    }

    /// True when the link's href occurs anywhere inside `path`.
    pub fn matches_path(&self, path: &str) -> bool {
        match self.href.as_deref() {
            Some(href) if !href.is_empty() => path.contains(href),
            _ => false,
        }
    }
}

/// Sidebar navigation links in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavMenu {
    links: Vec<NavLink>,
}

impl NavMenu {
    pub fn new(links: Vec<NavLink>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Load-time highlighting. Every matching link is marked; nothing is
    /// cleared first.
    pub fn highlight_current(&mut self, path: &str) -> usize {
        let mut marked = 0;
        for link in &mut self.links {
            if link.matches_path(path) {
                link.active = true;
                marked += 1;
            }
        }
        marked
    }

    /// Click handling: clear every mark, then mark only `index`.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.links.len() {
            return false;
        }
        for (position, link) in self.links.iter_mut().enumerate() {
            link.active = position == index;
        }
        true
    }

    pub fn active_indices(&self) -> Vec<usize> {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, link)| link.active)
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> NavMenu {
        NavMenu::new(vec![
            NavLink::new(Some("/admin/")),
            NavLink::new(Some("/admin/messages/")),
            NavLink::new(None),
            NavLink::new(Some("")),
        ])
    }

    #[test]
    fn load_highlights_every_substring_match() {
        let mut menu = menu();
        assert_eq!(menu.highlight_current("/admin/messages/"), 2);
        assert_eq!(menu.active_indices(), vec![0, 1]);
    }

    #[test]
    fn links_without_href_never_match() {
        let mut menu = menu();
        menu.highlight_current("/anything");
        assert!(menu.active_indices().is_empty());
    }

    #[test]
    fn click_leaves_exactly_one_active() {
        let mut menu = menu();
        menu.highlight_current("/admin/messages/");
        assert!(menu.activate(2));
        assert_eq!(menu.active_indices(), vec![2]);
        assert!(!menu.activate(9));
        assert_eq!(menu.active_indices(), vec![2]);
    }
}
