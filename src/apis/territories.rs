//! Source registry: which portals are scraped for each territory, with their
//! keyword tables and reference datasets.

use crate::apis::profile::*;
use crate::constants::*;
use crate::domain::Territory;

const REGIONAL_SECTORS_REUNION: SectorKeywords = &[
    ("Agriculture", &["agriculture", "agri", "rural", "filière"]),
    ("Tourisme", &["tourisme", "touristique", "hôtellerie"]),
    ("Formation", &["formation", "emploi", "compétence", "insertion"]),
    ("Environnement", &["environnement", "énergie", "renouvelable", "durable"]),
    ("Recherche", &["recherche", "innovation", "numérique", "technologie"]),
    ("Transport", &["transport", "mobilité", "infrastructure"]),
    ("Santé", &["santé", "médical", "social"]),
];

const ED_SECTORS_MARTINIQUE: SectorKeywords = &[
    ("Agriculture", &["agriculture", "agri", "rural"]),
    ("Tourisme", &["tourisme", "touristique"]),
    ("Recherche", &["recherche", "innovation", "numérique"]),
    ("Formation", &["formation", "emploi", "social"]),
    ("Environnement", &["environnement", "énergie", "durable"]),
    ("Transport", &["transport", "mobilité", "infrastructure"]),
];

const ED_SECTORS_SAINT_BARTHELEMY: SectorKeywords = &[
    ("Agriculture", &["agriculture", "agri", "rural"]),
    ("Tourisme", &["tourisme", "touristique", "hôtellerie", "luxe"]),
    ("Recherche", &["recherche", "innovation", "numérique"]),
    ("Formation", &["formation", "emploi", "social"]),
    ("Environnement", &["environnement", "énergie", "durable", "corail", "eau"]),
    ("Transport", &["transport", "mobilité", "infrastructure", "port"]),
];

const ED_SECTORS_WALLIS_FUTUNA: SectorKeywords = &[
    ("Agriculture", &["agriculture", "agri", "rural"]),
    ("Tourisme", &["tourisme", "touristique"]),
    ("Recherche", &["recherche", "innovation", "numérique"]),
    ("Formation", &["formation", "emploi", "social"]),
    ("Environnement", &["environnement", "énergie", "durable", "solaire"]),
    ("Transport", &["transport", "mobilité", "infrastructure"]),
    ("Pêche", &["pêche", "port", "aquaculture"]),
    ("Numérique", &["connectivité", "internet", "fibre"]),
];

const REGIONAL_SECTORS_SAINT_BARTHELEMY: SectorKeywords = &[
    ("Agriculture", &["agriculture", "agri", "rural", "filière"]),
    ("Tourisme", &["tourisme", "touristique", "hôtellerie", "restaurant", "luxe"]),
    ("Formation", &["formation", "emploi", "compétence", "insertion", "éducation"]),
    (
        "Environnement",
        &["environnement", "énergie", "renouvelable", "durable", "corail", "eau", "décharge", "déchets"],
    ),
    ("Recherche", &["recherche", "innovation", "numérique", "technologie"]),
    ("Transport", &["transport", "mobilité", "infrastructure", "port", "aéroport", "route"]),
    ("Santé", &["santé", "médical", "social"]),
    ("Services", &["services", "commerce", "immobilier"]),
];

const REGIONAL_SECTORS_SAINT_MARTIN: SectorKeywords = &[
    ("Agriculture", &["agriculture", "agri", "rural", "filière"]),
    ("Tourisme", &["tourisme", "touristique", "hôtellerie", "plage", "croisière"]),
    ("Formation", &["formation", "emploi", "compétence", "insertion", "éducation"]),
    (
        "Environnement",
        &["environnement", "énergie", "renouvelable", "durable", "solaire", "eau", "décharge"],
    ),
    ("Recherche", &["recherche", "innovation", "numérique", "technologie"]),
    ("Transport", &["transport", "mobilité", "infrastructure", "port", "route"]),
    ("Santé", &["santé", "médical", "social"]),
    ("Économie bleue", &["pêche", "port", "plongée", "marine", "économique bleue"]),
];

const REGIONAL_SECTORS_POLYNESIE: SectorKeywords = &[
    ("Agriculture", &["agriculture", "agri", "rural", "filière", "vanille", "noni"]),
    ("Tourisme", &["tourisme", "touristique", "hôtellerie", "lagon", "croisière", "perle"]),
    ("Formation", &["formation", "emploi", "compétence", "insertion", "éducation"]),
    (
        "Environnement",
        &["environnement", "énergie", "renouvelable", "durable", "solaire", "biodiversité", "corail"],
    ),
    ("Recherche", &["recherche", "innovation", "numérique", "technologie", "climat"]),
    ("Transport", &["transport", "mobilité", "infrastructure", "port", "aéroport", "ferry"]),
    ("Santé", &["santé", "médical", "social"]),
    ("Pêche", &["pêche", "thon", "aquaculture", "pêcheur"]),
];

const REGIONAL_SECTORS_NOUVELLE_CALEDONIE: SectorKeywords = &[
    ("Agriculture", &["agriculture", "agri", "rural", "filière", "élevage"]),
    ("Tourisme", &["tourisme", "touristique", "hôtellerie", "lagon", "croisière"]),
    ("Formation", &["formation", "emploi", "compétence", "insertion", "éducation"]),
    (
        "Environnement",
        &["environnement", "énergie", "renouvelable", "durable", "solaire", "biodiversité"],
    ),
    ("Recherche", &["recherche", "innovation", "numérique", "technologie"]),
    ("Transport", &["transport", "mobilité", "infrastructure", "port", "aéroport", "route"]),
    ("Santé", &["santé", "médical", "social"]),
    ("Industrie", &["nickel", "industrie", "minier", "métallurgie", "usine"]),
];

const REGIONAL_SECTORS_SPM: SectorKeywords = &[
    ("Agriculture", &["agriculture", "agri", "rural", "filière", "serre"]),
    ("Tourisme", &["tourisme", "touristique", "hôtellerie", "hivernal"]),
    ("Formation", &["formation", "emploi", "compétence", "insertion", "éducation"]),
    (
        "Environnement",
        &["environnement", "énergie", "renouvelable", "durable", "éolien", "déchets"],
    ),
    ("Recherche", &["recherche", "innovation", "numérique", "technologie"]),
    ("Transport", &["transport", "mobilité", "infrastructure", "port", "aéroport", "route"]),
    ("Santé", &["santé", "médical", "social"]),
    ("Pêche", &["pêche", "port", "aquaculture", "thon", "homard", "crabe", "usine"]),
    ("Numérique", &["connectivité", "internet", "fibre", "numérique"]),
    ("Énergie", &["éolien", "énergie", "autonomie", "isolation", "panneau"]),
];

pub static REGION_REUNION: SourceProfile = SourceProfile {
    source_id: REGION_REUNION_SOURCE,
    territory: Territory::Reunion,
    url: "https://www.regionreunion.com/fonds-europeens",
    source_label: "Région Réunion",
    kind: SourceKind::Portal(&REGIONAL_LAYOUT),
    default_title: "Projet Région Réunion",
    sector_keywords: REGIONAL_SECTORS_REUNION,
    communes: &[
        "Saint-Denis", "Saint-Pierre", "Le Tampon", "Saint-Paul", "Saint-Louis",
        "Saint-Benoît", "Saint-André", "Saint-Joseph", "Sainte-Marie",
    ],
    default_commune: "La Réunion",
    fallback: FallbackSet {
        id_prefix: "REG_REEL",
        paid_ratio: 0.55,
        taux_realisation: 55.0,
        beneficiaire: "Collectivités locales",
        date_debut: "2023-02-01",
        date_fin_prevue: "2025-08-31",
        commune: "La Réunion",
        source_label: "Région Réunion (données de référence)",
        projects: &[
            FallbackProject {
                titre: "Aménagement numérique du territoire",
                programme: "FEDER",
                secteur: "Numérique",
                montant: 3_000_000.0,
                commune: Some("Saint-Denis"),
            },
            FallbackProject {
                titre: "Développement de l'agro-transformation",
                programme: "FEADER",
                secteur: "Agriculture",
                montant: 1_500_000.0,
                commune: Some("Saint-Pierre"),
            },
            FallbackProject {
                titre: "Équipements sportifs régionaux",
                programme: "FEDER",
                secteur: "Équipements",
                montant: 2_200_000.0,
                commune: Some("Le Tampon"),
            },
            FallbackProject {
                titre: "Lutte contre l'illectronisme",
                programme: "FSE",
                secteur: "Formation",
                montant: 900_000.0,
                commune: Some("Saint-Paul"),
            },
        ],
    },
};

pub static EUROPE_DIRECT_MARTINIQUE: SourceProfile = SourceProfile {
    source_id: EUROPE_DIRECT_MARTINIQUE_SOURCE,
    territory: Territory::Martinique,
    url: "https://www.europe-direct-martinique.fr/les-fonds-europeens/",
    source_label: "Europe Direct Martinique",
    kind: SourceKind::Portal(&EUROPE_DIRECT_LAYOUT),
    default_title: "Projet Fonds Européen",
    sector_keywords: ED_SECTORS_MARTINIQUE,
    communes: &[],
    default_commune: "Martinique",
    fallback: FallbackSet {
        id_prefix: "ED_MTQ",
        paid_ratio: 0.65,
        taux_realisation: 65.0,
        beneficiaire: "Porteurs de projets locaux",
        date_debut: "2022-06-01",
        date_fin_prevue: "2025-06-01",
        commune: "Multiple",
        source_label: "Europe Direct Martinique (données de référence)",
        projects: &[
            FallbackProject {
                titre: "Transition énergétique en Martinique",
                programme: "FEDER",
                secteur: "Énergie renouvelable",
                montant: 2_800_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Formation aux métiers du tourisme",
                programme: "FSE",
                secteur: "Formation",
                montant: 1_350_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Modernisation des filières agricoles locales",
                programme: "FEADER",
                secteur: "Agriculture",
                montant: 1_950_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Coopération Caraïbes",
                programme: "INTERREG",
                secteur: "Coopération",
                montant: 1_050_000.0,
                commune: None,
            },
        ],
    },
};

pub static DATA_GOUV_MAYOTTE: SourceProfile = SourceProfile {
    source_id: DATA_GOUV_MAYOTTE_SOURCE,
    territory: Territory::Mayotte,
    url: DATA_GOUV_SEARCH_URL,
    source_label: "data.gouv.fr",
    kind: SourceKind::DataGouv {
        query: "fonds européens mayotte",
    },
    default_title: "Projet data.gouv.fr",
    sector_keywords: &[],
    communes: &[],
    default_commune: "Mayotte",
    fallback: FallbackSet {
        id_prefix: "DG_YT",
        paid_ratio: 0.75,
        taux_realisation: 75.0,
        beneficiaire: "Acteurs locaux",
        date_debut: "2023-03-01",
        date_fin_prevue: "2025-12-31",
        commune: "Multiple",
        source_label: "data.gouv.fr (données de référence Mayotte)",
        projects: &[
            FallbackProject {
                titre: "Projet Eau et assainissement - Fonds Européens",
                programme: "FEDER",
                secteur: "Eau et assainissement",
                montant: 3_500_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Projet Insertion professionnelle - Fonds Européens",
                programme: "FSE",
                secteur: "Insertion professionnelle",
                montant: 1_300_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Projet Agriculture locale - Fonds Européens",
                programme: "FEADER",
                secteur: "Agriculture locale",
                montant: 1_100_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Projet Développement économique - Fonds Européens",
                programme: "FEDER",
                secteur: "Développement économique",
                montant: 2_000_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Projet Coopération Océan Indien - Fonds Européens",
                programme: "INTERREG",
                secteur: "Coopération Océan Indien",
                montant: 800_000.0,
                commune: None,
            },
        ],
    },
};

pub static GOUV_NOUVELLE_CALEDONIE: SourceProfile = SourceProfile {
    source_id: GOUV_NOUVELLE_CALEDONIE_SOURCE,
    territory: Territory::NouvelleCaledonie,
    url: "https://www.gouv.nc/fonds-europeens",
    source_label: "Gouvernement de la Nouvelle-Calédonie",
    kind: SourceKind::Portal(&REGIONAL_LAYOUT),
    default_title: "Projet Gouvernement NC",
    sector_keywords: REGIONAL_SECTORS_NOUVELLE_CALEDONIE,
    communes: &[
        "Nouméa", "Dumbéa", "Païta", "Le Mont-Dore", "Bourail",
        "La Foa", "Sarraméa", "Farino", "Moindou", "Thio",
    ],
    default_commune: "Nouvelle-Calédonie",
    fallback: FallbackSet {
        id_prefix: "REG_NC",
        paid_ratio: 0.55,
        taux_realisation: 55.0,
        beneficiaire: "Collectivités et entreprises",
        date_debut: "2023-02-01",
        date_fin_prevue: "2025-08-31",
        commune: "Nouvelle-Calédonie",
        source_label: "Gouvernement de la Nouvelle-Calédonie (données de référence)",
        projects: &[
            FallbackProject {
                titre: "Modernisation et extension du port de Nouméa",
                programme: "FEDER",
                secteur: "Transport",
                montant: 5_500_000.0,
                commune: Some("Nouméa"),
            },
            FallbackProject {
                titre: "Parc d'innovation numérique",
                programme: "FEDER",
                secteur: "Recherche",
                montant: 3_000_000.0,
                commune: Some("Nouméa"),
            },
            FallbackProject {
                titre: "Programme de sécurité alimentaire et circuits courts",
                programme: "FEADER",
                secteur: "Agriculture",
                montant: 2_100_000.0,
                commune: Some("Dumbéa"),
            },
            FallbackProject {
                titre: "Plan de formation pour les industries extractives",
                programme: "FSE",
                secteur: "Formation",
                montant: 1_700_000.0,
                commune: Some("Le Mont-Dore"),
            },
        ],
    },
};

pub static GOUV_POLYNESIE: SourceProfile = SourceProfile {
    source_id: GOUV_POLYNESIE_SOURCE,
    territory: Territory::Polynesie,
    url: "https://www.polynesie.fr/fonds-europeens",
    source_label: "Gouvernement de la Polynésie",
    kind: SourceKind::Portal(&REGIONAL_LAYOUT),
    default_title: "Projet Gouvernement PF",
    sector_keywords: REGIONAL_SECTORS_POLYNESIE,
    communes: &[
        "Papeete", "Faa'a", "Punaauia", "Pirae", "Mahina",
        "Papara", "Arue", "Faaone", "Paea", "Vaitape",
    ],
    default_commune: "Polynésie",
    fallback: FallbackSet {
        id_prefix: "REG_PF",
        paid_ratio: 0.55,
        taux_realisation: 55.0,
        beneficiaire: "Collectivités et entreprises",
        date_debut: "2023-02-01",
        date_fin_prevue: "2025-08-31",
        commune: "Polynésie",
        source_label: "Gouvernement de la Polynésie (données de référence)",
        projects: &[
            FallbackProject {
                titre: "Modernisation de l'aéroport international de Tahiti Faa'a",
                programme: "FEDER",
                secteur: "Transport",
                montant: 6_000_000.0,
                commune: Some("Faa'a"),
            },
            FallbackProject {
                titre: "Plan de transition énergétique",
                programme: "FEDER",
                secteur: "Environnement",
                montant: 3_500_000.0,
                commune: Some("Papeete"),
            },
            FallbackProject {
                titre: "Développement des infrastructures numériques",
                programme: "FEDER",
                secteur: "Numérique",
                montant: 2_800_000.0,
                commune: Some("Punaauia"),
            },
            FallbackProject {
                titre: "Appui à la filière de la pêche professionnelle",
                programme: "FEADER",
                secteur: "Pêche",
                montant: 1_900_000.0,
                commune: Some("Papeete"),
            },
        ],
    },
};

pub static EUROPE_DIRECT_SAINT_BARTHELEMY: SourceProfile = SourceProfile {
    source_id: EUROPE_DIRECT_SAINT_BARTHELEMY_SOURCE,
    territory: Territory::SaintBarthelemy,
    url: "https://www.europe-direct-saint-barthelemy.fr/les-fonds-europeens/",
    source_label: "Europe Direct Saint-Barthélemy",
    kind: SourceKind::Portal(&EUROPE_DIRECT_LAYOUT),
    default_title: "Projet Fonds Européen",
    sector_keywords: ED_SECTORS_SAINT_BARTHELEMY,
    communes: &[],
    default_commune: "Saint-Barthélemy",
    fallback: FallbackSet {
        id_prefix: "ED_STB",
        paid_ratio: 0.65,
        taux_realisation: 65.0,
        beneficiaire: "Porteurs de projets locaux",
        date_debut: "2022-06-01",
        date_fin_prevue: "2025-06-01",
        commune: "Multiple",
        source_label: "Europe Direct Saint-Barthélemy (données de référence)",
        projects: &[
            FallbackProject {
                titre: "Programme d'autonomie et de qualité de l'eau",
                programme: "FEDER",
                secteur: "Environnement",
                montant: 4_000_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Centre de valorisation et de tri des déchets",
                programme: "FEDER",
                secteur: "Environnement",
                montant: 3_500_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Soutien à la rénovation hôtelière écologique",
                programme: "FSE",
                secteur: "Formation",
                montant: 1_500_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Éducation numérique pour les jeunes",
                programme: "FSE",
                secteur: "Numérique",
                montant: 800_000.0,
                commune: None,
            },
        ],
    },
};

pub static COLLECTIVITE_SAINT_BARTHELEMY: SourceProfile = SourceProfile {
    source_id: COLLECTIVITE_SAINT_BARTHELEMY_SOURCE,
    territory: Territory::SaintBarthelemy,
    url: "https://www.com-saint-barth.fr/fonds-europeens",
    source_label: "Collectivité de Saint-Barthélemy",
    kind: SourceKind::Portal(&REGIONAL_LAYOUT),
    default_title: "Projet Collectivité STB",
    sector_keywords: REGIONAL_SECTORS_SAINT_BARTHELEMY,
    communes: &["Gustavia", "Lorient", "Saint-Jean", "Anse des Cayes", "Gouverneur"],
    default_commune: "Saint-Barthélemy",
    fallback: FallbackSet {
        id_prefix: "REG_STB",
        paid_ratio: 0.55,
        taux_realisation: 55.0,
        beneficiaire: "Collectivité et entreprises",
        date_debut: "2023-02-01",
        date_fin_prevue: "2025-08-31",
        commune: "Saint-Barthélemy",
        source_label: "Collectivité de Saint-Barthélemy (données de référence)",
        projects: &[
            FallbackProject {
                titre: "Extension et modernisation du port de Gustavia",
                programme: "FEDER",
                secteur: "Transport",
                montant: 5_500_000.0,
                commune: Some("Gustavia"),
            },
            FallbackProject {
                titre: "Programme d'efficacité énergétique des bâtiments publics",
                programme: "FEDER",
                secteur: "Environnement",
                montant: 2_800_000.0,
                commune: Some("Gustavia"),
            },
            FallbackProject {
                titre: "Déploiement du très haut débit sur l'île",
                programme: "FEDER",
                secteur: "Numérique",
                montant: 3_500_000.0,
                commune: Some("Multiple"),
            },
            FallbackProject {
                titre: "Plan de gestion des côtes et des fonds marins",
                programme: "FEADER",
                secteur: "Environnement",
                montant: 1_800_000.0,
                commune: Some("Multiple"),
            },
        ],
    },
};

pub static COLLECTIVITE_SAINT_MARTIN: SourceProfile = SourceProfile {
    source_id: COLLECTIVITE_SAINT_MARTIN_SOURCE,
    territory: Territory::SaintMartin,
    url: "https://www.com-saint-martin.fr/fonds-europeens",
    source_label: "Collectivité de Saint-Martin",
    kind: SourceKind::Portal(&REGIONAL_LAYOUT),
    default_title: "Projet Collectivité SM",
    sector_keywords: REGIONAL_SECTORS_SAINT_MARTIN,
    communes: &["Marigot", "Grand-Case", "Quartier d'Orléans", "Lowlands", "Simpson Bay"],
    default_commune: "Saint-Martin",
    fallback: FallbackSet {
        id_prefix: "REG_SMF",
        paid_ratio: 0.55,
        taux_realisation: 55.0,
        beneficiaire: "Collectivité et entreprises",
        date_debut: "2023-02-01",
        date_fin_prevue: "2025-08-31",
        commune: "Saint-Martin",
        source_label: "Collectivité de Saint-Martin (données de référence)",
        projects: &[
            FallbackProject {
                titre: "Construction d'une nouvelle usine de dessalement",
                programme: "FEDER",
                secteur: "Environnement",
                montant: 4_500_000.0,
                commune: Some("Marigot"),
            },
            FallbackProject {
                titre: "Aménagement du front de mer de Marigot",
                programme: "FEDER",
                secteur: "Tourisme",
                montant: 3_200_000.0,
                commune: Some("Marigot"),
            },
            FallbackProject {
                titre: "Centre de tri et de valorisation des déchets",
                programme: "FEDER",
                secteur: "Environnement",
                montant: 2_600_000.0,
                commune: Some("Grand-Case"),
            },
            FallbackProject {
                titre: "Plan de digitalisation des services publics",
                programme: "FSE",
                secteur: "Numérique",
                montant: 1_100_000.0,
                commune: Some("Marigot"),
            },
        ],
    },
};

pub static COLLECTIVITE_SAINT_PIERRE_MIQUELON: SourceProfile = SourceProfile {
    source_id: COLLECTIVITE_SPM_SOURCE,
    territory: Territory::SaintPierreEtMiquelon,
    url: "https://www.saint-pierre-et-miquelon.fr/fonds-europeens",
    source_label: "Collectivité de Saint-Pierre et Miquelon",
    kind: SourceKind::Portal(&REGIONAL_LAYOUT),
    default_title: "Projet Collectivité SPM",
    sector_keywords: REGIONAL_SECTORS_SPM,
    communes: &["Saint-Pierre", "Miquelon", "Langlade"],
    default_commune: "Saint-Pierre et Miquelon",
    fallback: FallbackSet {
        id_prefix: "REG_SPM",
        paid_ratio: 0.55,
        taux_realisation: 55.0,
        beneficiaire: "Collectivité et entreprises",
        date_debut: "2023-02-01",
        date_fin_prevue: "2025-08-31",
        commune: "Saint-Pierre et Miquelon",
        source_label: "Collectivité SPM (données de référence)",
        projects: &[
            FallbackProject {
                titre: "Construction d'un parc éolien",
                programme: "FEDER",
                secteur: "Énergie",
                montant: 6_500_000.0,
                commune: Some("Miquelon-Langlade"),
            },
            FallbackProject {
                titre: "Extension du port de Saint-Pierre",
                programme: "FEDER",
                secteur: "Transport",
                montant: 4_800_000.0,
                commune: Some("Saint-Pierre"),
            },
            FallbackProject {
                titre: "Création d'une usine de transformation du poisson",
                programme: "FEADER",
                secteur: "Pêche",
                montant: 3_500_000.0,
                commune: Some("Saint-Pierre"),
            },
            FallbackProject {
                titre: "Mise en place du très haut débit par fibre optique",
                programme: "FEDER",
                secteur: "Numérique",
                montant: 2_900_000.0,
                commune: Some("Multiple"),
            },
        ],
    },
};

pub static EUROPE_DIRECT_WALLIS_FUTUNA: SourceProfile = SourceProfile {
    source_id: EUROPE_DIRECT_WALLIS_FUTUNA_SOURCE,
    territory: Territory::WallisEtFutuna,
    url: "https://www.europe-direct-wallis-futuna.fr/les-fonds-europeens/",
    source_label: "Europe Direct Wallis et Futuna",
    kind: SourceKind::Portal(&EUROPE_DIRECT_LAYOUT),
    default_title: "Projet Fonds Européen",
    sector_keywords: ED_SECTORS_WALLIS_FUTUNA,
    communes: &[],
    default_commune: "Wallis et Futuna",
    fallback: FallbackSet {
        id_prefix: "ED_WLF",
        paid_ratio: 0.65,
        taux_realisation: 65.0,
        beneficiaire: "Porteurs de projets locaux",
        date_debut: "2022-06-01",
        date_fin_prevue: "2025-06-01",
        commune: "Multiple",
        source_label: "Europe Direct W&F (données de référence)",
        projects: &[
            FallbackProject {
                titre: "Programme d'autonomie énergétique par le solaire",
                programme: "FEDER",
                secteur: "Énergie",
                montant: 4_500_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Développement de la connectivité internet haute vitesse",
                programme: "FEDER",
                secteur: "Numérique",
                montant: 3_800_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Soutien à la pêche durable et à la gestion des côtes",
                programme: "FEADER",
                secteur: "Pêche",
                montant: 1_600_000.0,
                commune: None,
            },
            FallbackProject {
                titre: "Formation aux métiers de la transition écologique",
                programme: "FSE",
                secteur: "Formation",
                montant: 1_300_000.0,
                commune: None,
            },
        ],
    },
};

static REUNION_SOURCES: [&SourceProfile; 1] = [&REGION_REUNION];
static MARTINIQUE_SOURCES: [&SourceProfile; 1] = [&EUROPE_DIRECT_MARTINIQUE];
static MAYOTTE_SOURCES: [&SourceProfile; 1] = [&DATA_GOUV_MAYOTTE];
static NOUVELLE_CALEDONIE_SOURCES: [&SourceProfile; 1] = [&GOUV_NOUVELLE_CALEDONIE];
static POLYNESIE_SOURCES: [&SourceProfile; 1] = [&GOUV_POLYNESIE];
static SAINT_BARTHELEMY_SOURCES: [&SourceProfile; 2] =
    [&EUROPE_DIRECT_SAINT_BARTHELEMY, &COLLECTIVITE_SAINT_BARTHELEMY];
static SAINT_MARTIN_SOURCES: [&SourceProfile; 1] = [&COLLECTIVITE_SAINT_MARTIN];
static SAINT_PIERRE_MIQUELON_SOURCES: [&SourceProfile; 1] = [&COLLECTIVITE_SAINT_PIERRE_MIQUELON];
static WALLIS_FUTUNA_SOURCES: [&SourceProfile; 1] = [&EUROPE_DIRECT_WALLIS_FUTUNA];

/// Profiles scraped for a territory, in fetch order
pub fn profiles_for(territory: Territory) -> &'static [&'static SourceProfile] {
    match territory {
        Territory::Reunion => &REUNION_SOURCES,
        Territory::Martinique => &MARTINIQUE_SOURCES,
        Territory::Mayotte => &MAYOTTE_SOURCES,
        Territory::NouvelleCaledonie => &NOUVELLE_CALEDONIE_SOURCES,
        Territory::Polynesie => &POLYNESIE_SOURCES,
        Territory::SaintBarthelemy => &SAINT_BARTHELEMY_SOURCES,
        Territory::SaintMartin => &SAINT_MARTIN_SOURCES,
        Territory::SaintPierreEtMiquelon => &SAINT_PIERRE_MIQUELON_SOURCES,
        Territory::WallisEtFutuna => &WALLIS_FUTUNA_SOURCES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalize::normalize;

    #[test]
    fn test_every_territory_has_a_source() {
        for territory in Territory::ALL {
            let profiles = profiles_for(territory);
            assert!(!profiles.is_empty(), "{territory} has no source");
            for profile in profiles {
                assert_eq!(profile.territory, territory);
            }
        }
    }

    #[test]
    fn test_fallback_datasets_survive_normalization() {
        for territory in Territory::ALL {
            for profile in profiles_for(territory) {
                let raw = profile.fallback.to_records();
                assert!(!raw.is_empty(), "{} fallback is empty", profile.source_id);
                assert_eq!(normalize(&raw).len(), raw.len(), "{}", profile.source_id);
            }
        }
    }

    #[test]
    fn test_source_ids_are_unique() {
        let mut ids: Vec<_> = Territory::ALL
            .into_iter()
            .flat_map(|t| profiles_for(t).iter().map(|p| p.source_id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
