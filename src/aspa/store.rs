/// ASPAレコードの読み取り専用ビュー。
/// 構築後は変更せず、リフレッシュ時は丸ごと差し替える。
use crate::common::Afi;
use std::collections::{BTreeSet, HashMap};

/// customer ASN → 認可済みプロバイダ集合
type ProviderTable = HashMap<u32, BTreeSet<u32>>;

/// 1ペアの認可判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Authorization {
    Valid,
    Invalid,
    Unknown,
}

#[derive(Debug, Clone, Default)]
pub struct AspaStore {
    families: HashMap<Afi, ProviderTable>,
}

impl AspaStore {
    pub fn builder() -> AspaStoreBuilder {
        AspaStoreBuilder::default()
    }

    /// `provider` が `customer` の認可済みプロバイダかどうか
    pub fn is_authorized_provider(&self, customer: u32, provider: u32, afi: Afi) -> Authorization {
        // ファミリ自体が無ければ証明なし
        let Some(table) = self.families.get(&afi) else {
            return Authorization::Unknown;
        };

        match table.get(&customer) {
            None => Authorization::Unknown,
            Some(providers) if providers.contains(&provider) => Authorization::Valid,
            Some(_) => Authorization::Invalid,
        }
    }

    /// customer の証明済みプロバイダ集合（証明なしなら None）
    pub fn providers(&self, customer: u32, afi: Afi) -> Option<&BTreeSet<u32>> {
        self.families.get(&afi)?.get(&customer)
    }

    /// 指定ファミリのレコード数
    pub fn customer_count(&self, afi: Afi) -> usize {
        self.families.get(&afi).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.families.values().all(HashMap::is_empty)
    }
}

impl From<HashMap<Afi, HashMap<u32, BTreeSet<u32>>>> for AspaStore {
    fn from(families: HashMap<Afi, HashMap<u32, BTreeSet<u32>>>) -> Self {
        AspaStore { families }
    }
}

/// AspaStore の組み立て用。
/// 同一ファミリ内で同じcustomerを再登録した場合は後勝ち。
#[derive(Debug, Default)]
pub struct AspaStoreBuilder {
    families: HashMap<Afi, ProviderTable>,
}

impl AspaStoreBuilder {
    pub fn insert<I>(&mut self, afi: Afi, customer: u32, providers: I) -> &mut Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.families
            .entry(afi)
            .or_default()
            .insert(customer, providers.into_iter().collect());
        self
    }

    /// レコードを持たないファミリも「空」として明示的に登録する
    pub fn family(&mut self, afi: Afi) -> &mut Self {
        self.families.entry(afi).or_default();
        self
    }

    pub fn build(&mut self) -> AspaStore {
        AspaStore {
            families: std::mem::take(&mut self.families),
        }
    }
}
