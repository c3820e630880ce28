use std::collections::HashMap;

/// Common ticker abbreviations and alternate spellings → CoinGecko ids.
const COMMON_ALIASES: &[(&str, &str)] = &[
    // Top 20
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("usdt", "tether"),
    ("bnb", "binancecoin"),
    ("sol", "solana"),
    ("xrp", "ripple"),
    ("usdc", "usd-coin"),
    ("ada", "cardano"),
    ("doge", "dogecoin"),
    ("avax", "avalanche-2"),
    ("trx", "tron"),
    ("dot", "polkadot"),
    ("matic", "polygon"),
    ("link", "chainlink"),
    ("shib", "shiba-inu"),
    ("dai", "dai"),
    ("ltc", "litecoin"),
    ("uni", "uniswap"),
    ("atom", "cosmos"),
    ("etc", "ethereum-classic"),
    // 21-50
    ("okb", "okb"),
    ("xmr", "monero"),
    ("fil", "filecoin"),
    ("near", "near"),
    ("apt", "aptos"),
    ("xlm", "stellar"),
    ("ldo", "lido-dao"),
    ("icp", "internet-computer"),
    ("bcn", "bitcoin-cash"),
    ("inj", "injective-protocol"),
    ("arb", "arbitrum"),
    ("hbar", "hedera-hashgraph"),
    ("vet", "vechain"),
    ("op", "optimism"),
    ("sui", "sui"),
    ("mana", "decentraland"),
    ("sand", "the-sandbox"),
    ("grt", "the-graph"),
    ("algo", "algorand"),
    ("theta", "theta-network"),
    ("aave", "aave"),
    ("axs", "axie-infinity"),
    ("eos", "eos"),
    ("ftm", "fantom"),
    ("flow", "flow"),
    ("neo", "neo"),
    ("gala", "gala"),
    ("cake", "pancakeswap-token"),
    ("kcs", "kucoin-shares"),
    ("snx", "synthetix-network-token"),
    // Alternate spellings
    ("bitcoin", "bitcoin"),
    ("ethereum", "ethereum"),
    ("cardano", "cardano"),
    ("polkadot", "polkadot"),
    ("chainlink", "chainlink"),
    ("polygon", "polygon"),
    ("solana", "solana"),
    ("avalanche", "avalanche-2"),
    ("uniswap", "uniswap"),
    ("ripple", "ripple"),
];

/// Static alias table mapping what users type to canonical API ids.
///
/// Lookups are case-insensitive and ignore surrounding whitespace.
/// The search flow only consults it when `Settings::resolve_aliases` is on.
#[derive(Debug, Clone)]
pub struct SymbolAliases {
    map: HashMap<String, String>,
}

impl SymbolAliases {
    /// Table seeded with the common mappings.
    pub fn new() -> Self {
        let map = COMMON_ALIASES
            .iter()
            .map(|(alias, id)| (alias.to_string(), id.to_string()))
            .collect();
        Self { map }
    }

    /// Empty table.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Add or replace one mapping.
    pub fn insert(&mut self, alias: &str, id: &str) {
        self.map
            .insert(alias.trim().to_lowercase(), id.trim().to_lowercase());
    }

    /// Canonical id for an alias, if known.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.map
            .get(&alias.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Normalize a query: the canonical id when the query is a known alias,
    /// otherwise the trimmed query unchanged.
    pub fn resolve(&self, query: &str) -> String {
        self.get(query)
            .map(str::to_string)
            .unwrap_or_else(|| query.trim().to_string())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for SymbolAliases {
    fn default() -> Self {
        Self::new()
    }
}
