/// Territory slugs (used on the CLI and in config files)
pub const REUNION: &str = "reunion";
pub const MARTINIQUE: &str = "martinique";
pub const MAYOTTE: &str = "mayotte";
pub const NOUVELLE_CALEDONIE: &str = "nouvelle-caledonie";
pub const POLYNESIE: &str = "polynesie";
pub const SAINT_BARTHELEMY: &str = "saint-barthelemy";
pub const SAINT_MARTIN: &str = "saint-martin";
pub const SAINT_PIERRE_MIQUELON: &str = "saint-pierre-et-miquelon";
pub const WALLIS_FUTUNA: &str = "wallis-et-futuna";

// Source identifiers, one per extractor instance
pub const REGION_REUNION_SOURCE: &str = "region_reunion";
pub const EUROPE_DIRECT_MARTINIQUE_SOURCE: &str = "europe_direct_martinique";
pub const DATA_GOUV_MAYOTTE_SOURCE: &str = "data_gouv_mayotte";
pub const GOUV_NOUVELLE_CALEDONIE_SOURCE: &str = "gouv_nouvelle_caledonie";
pub const GOUV_POLYNESIE_SOURCE: &str = "gouv_polynesie";
pub const EUROPE_DIRECT_SAINT_BARTHELEMY_SOURCE: &str = "europe_direct_saint_barthelemy";
pub const COLLECTIVITE_SAINT_BARTHELEMY_SOURCE: &str = "collectivite_saint_barthelemy";
pub const COLLECTIVITE_SAINT_MARTIN_SOURCE: &str = "collectivite_saint_martin";
pub const COLLECTIVITE_SPM_SOURCE: &str = "collectivite_saint_pierre_miquelon";
pub const EUROPE_DIRECT_WALLIS_FUTUNA_SOURCE: &str = "europe_direct_wallis_futuna";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DATA_GOUV_SEARCH_URL: &str = "https://www.data.gouv.fr/api/1/datasets/";

/// Accepted `montant_total` range, both bounds exclusive
pub const MIN_AMOUNT: f64 = 1_000.0;
pub const MAX_AMOUNT: f64 = 100_000_000.0;

/// Rows the dashboard table can display
pub const ROW_COUNT_MENU: [usize; 4] = [10, 25, 50, 100];

pub const DEFAULT_SECTOR: &str = "Développement régional";
