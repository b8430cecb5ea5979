#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Pricing,
    App,
}

impl View {
    pub const ALL: [View; 3] = [Self::Landing, Self::Pricing, Self::App];

    pub fn label(self) -> &'static str {
        match self {
            Self::Landing => "Home",
            Self::Pricing => "Pricing",
            Self::App => "Dashboard",
        }
    }

    pub fn fragment(self) -> &'static str {
        match self {
            Self::Landing => "#/",
            Self::Pricing => "#/pricing",
            Self::App => "#/app",
        }
    }
}

pub fn resolve(fragment: &str) -> View {
    let key = route_key(fragment);
    match key {
        "pricing" => View::Pricing,
        "app" => View::App,
        _ => View::Landing,
    }
}

pub fn targets_app(fragment: &str) -> bool {
    let fragment = fragment.trim();
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let fragment = fragment.strip_prefix('/').unwrap_or(fragment);
    fragment.starts_with("app")
}

fn route_key(fragment: &str) -> &str {
    let fragment = fragment.trim();
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let fragment = fragment.strip_prefix('/').unwrap_or(fragment);
    fragment.trim()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn known_fragments_resolve() {
        assert_eq!(resolve("#/"), View::Landing);
        assert_eq!(resolve(""), View::Landing);
        assert_eq!(resolve("#/pricing"), View::Pricing);
        assert_eq!(resolve("#/app"), View::App);
        assert_eq!(resolve("app"), View::App);
        assert_eq!(resolve("#pricing"), View::Pricing);
    }

    #[test]
    fn unknown_fragments_fall_back_to_landing() {
        assert_eq!(resolve("#/settings"), View::Landing);
        assert_eq!(resolve("#/app/extra"), View::Landing);
        assert_eq!(resolve("#//app"), View::Landing);
    }

    #[test]
    fn app_prefix_detection() {
        assert!(targets_app("#/app"));
        assert!(targets_app("#/app?tab=goals"));
        assert!(!targets_app("#/pricing"));
        assert!(!targets_app("#/"));
    }

    #[test]
    fn fragments_round_trip() {
        for view in View::ALL {
            assert_eq!(resolve(view.fragment()), view);
        }
    }
}
