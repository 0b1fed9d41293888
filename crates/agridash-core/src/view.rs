use std::str::FromStr;

/// Top-level dashboard screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Chat,
    Inventory,
    ShopFinder,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Dashboard => write!(f, "dashboard"),
            View::Chat => write!(f, "chat"),
            View::Inventory => write!(f, "inventory"),
            View::ShopFinder => write!(f, "shops"),
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(View::Dashboard),
            "chat" => Ok(View::Chat),
            "inventory" => Ok(View::Inventory),
            "shops" | "shop-finder" => Ok(View::ShopFinder),
            other => Err(format!("unknown view '{other}'")),
        }
    }
}
