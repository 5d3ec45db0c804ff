//! Domain message model types, directory filter flags and fixed values.

use serde::Serialize;
use std::ops::BitOr;

pub const MMT_LOGIN: u16 = 1;
pub const MMT_DIRECTORY: u16 = 4;
pub const MMT_DICTIONARY: u16 = 5;
pub const MMT_MARKET_PRICE: u16 = 6;
pub const MMT_MARKET_BY_ORDER: u16 = 7;
pub const MMT_MARKET_BY_PRICE: u16 = 8;
pub const MMT_MARKET_MAKER: u16 = 9;
pub const MMT_SYMBOL_LIST: u16 = 10;
pub const MMT_SERVICE_PROVIDER_STATUS: u16 = 11;
pub const MMT_HISTORY: u16 = 12;
pub const MMT_HEADLINE: u16 = 13;
pub const MMT_STORY: u16 = 14;
pub const MMT_REPLAYHEADLINE: u16 = 15;
pub const MMT_REPLAYSTORY: u16 = 16;
pub const MMT_TRANSACTION: u16 = 17;
pub const MMT_YIELD_CURVE: u16 = 22;
pub const MMT_CONTRIBUTION: u16 = 27;
pub const MMT_PROVIDER_ADMIN: u16 = 29;
pub const MMT_ANALYTICS: u16 = 30;
pub const MMT_REFERENCE: u16 = 31;
pub const MMT_NEWS_TEXT_ANALYTICS: u16 = 33;
pub const MMT_SYSTEM: u16 = 127;

/// Capability names accepted in service configuration.
pub(crate) const CAPABILITY_NAMES: &[(&str, u16)] = &[
    ("MMT_LOGIN", MMT_LOGIN),
    ("MMT_DIRECTORY", MMT_DIRECTORY),
    ("MMT_DICTIONARY", MMT_DICTIONARY),
    ("MMT_MARKET_PRICE", MMT_MARKET_PRICE),
    ("MMT_MARKET_BY_ORDER", MMT_MARKET_BY_ORDER),
    ("MMT_MARKET_BY_PRICE", MMT_MARKET_BY_PRICE),
    ("MMT_MARKET_MAKER", MMT_MARKET_MAKER),
    ("MMT_SYMBOL_LIST", MMT_SYMBOL_LIST),
    ("MMT_SERVICE_PROVIDER_STATUS", MMT_SERVICE_PROVIDER_STATUS),
    ("MMT_HISTORY", MMT_HISTORY),
    ("MMT_HEADLINE", MMT_HEADLINE),
    ("MMT_STORY", MMT_STORY),
    ("MMT_REPLAYHEADLINE", MMT_REPLAYHEADLINE),
    ("MMT_REPLAYSTORY", MMT_REPLAYSTORY),
    ("MMT_TRANSACTION", MMT_TRANSACTION),
    ("MMT_YIELD_CURVE", MMT_YIELD_CURVE),
    ("MMT_CONTRIBUTION", MMT_CONTRIBUTION),
    ("MMT_PROVIDER_ADMIN", MMT_PROVIDER_ADMIN),
    ("MMT_ANALYTICS", MMT_ANALYTICS),
    ("MMT_REFERENCE", MMT_REFERENCE),
    ("MMT_NEWS_TEXT_ANALYTICS", MMT_NEWS_TEXT_ANALYTICS),
    ("MMT_SYSTEM", MMT_SYSTEM),
];

/// Status text carried by generated directory refreshes.
pub const DIRECTORY_REFRESH_TEXT: &str = "Source Directory Refresh Completed";

/// Directory filter bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FilterFlags(u32);

impl FilterFlags {
    pub const NONE: FilterFlags = FilterFlags(0);
    pub const INFO: FilterFlags = FilterFlags(0x01);
    pub const STATE: FilterFlags = FilterFlags(0x02);
    pub const GROUP: FilterFlags = FilterFlags(0x04);
    pub const LOAD: FilterFlags = FilterFlags(0x08);
    pub const DATA: FilterFlags = FilterFlags(0x10);
    pub const LINK: FilterFlags = FilterFlags(0x20);

    pub fn from_bits(bits: u32) -> Self {
        FilterFlags(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: FilterFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FilterFlags {
    type Output = FilterFlags;

    fn bitor(self, rhs: FilterFlags) -> FilterFlags {
        FilterFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for FilterFlags {
    fn bitor_assign(&mut self, rhs: FilterFlags) {
        self.0 |= rhs.0;
    }
}
