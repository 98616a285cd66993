//! Derived, display-ready views over a snapshot.
//!
//! Views own nothing but their own settings; every read recomputes from the
//! collection handed in and never mutates it.

pub mod format;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::DexPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Liquidity,
    Apy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortError(String);

impl fmt::Display for ParseSortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized sort option: {}", self.0)
    }
}

impl std::error::Error for ParseSortError {}

impl FromStr for SortKey {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "liquidity" => Ok(SortKey::Liquidity),
            "apy" => Ok(SortKey::Apy),
            other => Err(ParseSortError(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Liquidity => "liquidity",
            SortKey::Apy => "apy",
        })
    }
}

impl FromStr for SortDirection {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ParseSortError(other.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

fn sort_value(pool: &DexPool, key: SortKey) -> f64 {
    match key {
        SortKey::Liquidity => pool.liquidity as f64,
        SortKey::Apy => pool.apy,
    }
}

/// Sorted copy of `pools`. Equal keys keep their source order.
pub fn sorted_view(pools: &[DexPool], key: SortKey, direction: SortDirection) -> Vec<DexPool> {
    let mut out = pools.to_vec();
    out.sort_by(|a, b| {
        let ord = sort_value(a, key)
            .partial_cmp(&sort_value(b, key))
            .unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    out
}

/// Sort settings of the pool table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for PoolSort {
    fn default() -> Self {
        Self {
            key: SortKey::Liquidity,
            direction: SortDirection::Desc,
        }
    }
}

impl PoolSort {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Same key flips the direction; a new key is selected descending.
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Desc;
        }
    }

    pub fn apply(&self, pools: &[DexPool]) -> Vec<DexPool> {
        sorted_view(pools, self.key, self.direction)
    }
}
