#![allow(dead_code)]

use aspa_scope::aspa::AspaStore;
use aspa_scope::common::Afi;

/// Tier1 は AS0 (プロバイダなし) を登録
pub fn sample_store() -> AspaStore {
    let mut builder = AspaStore::builder();
    builder
        .insert(Afi::V4, 3356, [0])
        .insert(Afi::V4, 2914, [0])
        .insert(Afi::V4, 174, [0])
        .insert(
            Afi::V4,
            13238,
            [6762, 174, 9002, 6939, 208722, 1299, 3356],
        )
        .insert(Afi::V4, 43247, [13238])
        .insert(Afi::V4, 12389, [1273, 1299, 3257, 3356, 3491, 5511])
        .family(Afi::V6);
    builder.build()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    Provider,
    NotProvider,
    NoAttestation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormalResult {
    Valid,
    Invalid,
    Unknown,
}

/// draft-ietf-sidrops-aspa-verification-16 の手順をそのまま書いた比較用実装。
/// `origin_first` は起点ASが先頭。AS(1) が起点、AS(N) が隣接AS。
pub struct FormalOracle<'a> {
    store: &'a AspaStore,
    origin_first: &'a [u32],
}

impl<'a> FormalOracle<'a> {
    pub fn new(store: &'a AspaStore, origin_first: &'a [u32]) -> Self {
        FormalOracle {
            store,
            origin_first,
        }
    }

    fn as_at(&self, k: usize) -> u32 {
        self.origin_first[k - 1]
    }

    /// AS(j) が AS(i) のプロバイダか
    fn hop(&self, i: usize, j: usize) -> Hop {
        match self.store.providers(self.as_at(i), Afi::V4) {
            None => Hop::NoAttestation,
            Some(p) if p.contains(&self.as_at(j)) => Hop::Provider,
            Some(_) => Hop::NotProvider,
        }
    }

    pub fn upstream(&self) -> FormalResult {
        let n = self.origin_first.len();
        if n == 1 {
            return FormalResult::Valid;
        }
        if (2..=n).any(|i| self.hop(i - 1, i) == Hop::NotProvider) {
            return FormalResult::Invalid;
        }
        if (2..=n).any(|i| self.hop(i - 1, i) == Hop::NoAttestation) {
            return FormalResult::Unknown;
        }
        FormalResult::Valid
    }

    pub fn downstream(&self) -> FormalResult {
        let n = self.origin_first.len();
        if n <= 2 {
            return FormalResult::Valid;
        }

        let u_min = (2..=n)
            .find(|&u| self.hop(u - 1, u) == Hop::NotProvider)
            .unwrap_or(n + 1);
        let v_max = (1..n)
            .rev()
            .find(|&v| self.hop(v + 1, v) == Hop::NotProvider)
            .unwrap_or(0);
        if u_min <= v_max {
            return FormalResult::Invalid;
        }

        let mut k = 1;
        for i in 2..=n {
            if self.hop(i - 1, i) != Hop::Provider {
                break;
            }
            k += 1;
        }

        let mut l = n;
        for j in (1..n).rev() {
            if self.hop(j + 1, j) != Hop::Provider {
                break;
            }
            l -= 1;
        }

        if l <= k + 1 {
            FormalResult::Valid
        } else {
            FormalResult::Unknown
        }
    }
}
