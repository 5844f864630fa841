// Offline extraction of market snapshots from saved listing pages.

pub mod steam_parser;

pub use steam_parser::{Parser, SteamMarketParser};
