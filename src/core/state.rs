use serde::{Deserialize, Serialize};

/// Toggleable filters offered in the filter sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    #[serde(rename = "alpha")]
    NameAscending,
    #[serde(rename = "reverseAlpha")]
    NameDescending,
    #[serde(rename = "cityAlpha")]
    CityAscending,
    #[serde(rename = "cityReverseAlpha")]
    CityDescending,
    #[serde(rename = "card")]
    CardPayment,
    #[serde(rename = "izly")]
    IzlyPayment,
    #[serde(rename = "open")]
    OpenNow,
    #[serde(rename = "accessible")]
    Accessible,
}

impl FilterKind {
    pub const ALL: [FilterKind; 8] = [
        FilterKind::NameAscending,
        FilterKind::NameDescending,
        FilterKind::CityAscending,
        FilterKind::CityDescending,
        FilterKind::CardPayment,
        FilterKind::IzlyPayment,
        FilterKind::OpenNow,
        FilterKind::Accessible,
    ];

    /// The filter switched off when this one is toggled, if any
    pub fn opposite(self) -> Option<FilterKind> {
        match self {
            FilterKind::NameAscending => Some(FilterKind::NameDescending),
            FilterKind::NameDescending => Some(FilterKind::NameAscending),
            FilterKind::CityAscending => Some(FilterKind::CityDescending),
            FilterKind::CityDescending => Some(FilterKind::CityAscending),
            _ => None,
        }
    }
}

/// Active filters of one browsing session
///
/// Clients keep this and send it with every search; it is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub name_ascending: bool,
    pub name_descending: bool,
    pub city_ascending: bool,
    pub city_descending: bool,
    pub card_payment: bool,
    pub izly_payment: bool,
    pub open_now: bool,
    pub accessible: bool,
    pub region: Option<i64>,
}

impl FilterState {
    pub fn is_enabled(&self, kind: FilterKind) -> bool {
        match kind {
            FilterKind::NameAscending => self.name_ascending,
            FilterKind::NameDescending => self.name_descending,
            FilterKind::CityAscending => self.city_ascending,
            FilterKind::CityDescending => self.city_descending,
            FilterKind::CardPayment => self.card_payment,
            FilterKind::IzlyPayment => self.izly_payment,
            FilterKind::OpenNow => self.open_now,
            FilterKind::Accessible => self.accessible,
        }
    }

    fn flag_mut(&mut self, kind: FilterKind) -> &mut bool {
        match kind {
            FilterKind::NameAscending => &mut self.name_ascending,
            FilterKind::NameDescending => &mut self.name_descending,
            FilterKind::CityAscending => &mut self.city_ascending,
            FilterKind::CityDescending => &mut self.city_descending,
            FilterKind::CardPayment => &mut self.card_payment,
            FilterKind::IzlyPayment => &mut self.izly_payment,
            FilterKind::OpenNow => &mut self.open_now,
            FilterKind::Accessible => &mut self.accessible,
        }
    }

    /// Flip one filter, clearing its opposite sort direction
    pub fn toggle(mut self, kind: FilterKind) -> Self {
        if let Some(opposite) = kind.opposite() {
            *self.flag_mut(opposite) = false;
        }

        let flag = self.flag_mut(kind);
        *flag = !*flag;
        self
    }

    /// Every flag off and no region
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: Option<i64>) -> Self {
        self.region = region;
        self
    }

    pub fn active_filters(&self) -> Vec<FilterKind> {
        FilterKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }
}
