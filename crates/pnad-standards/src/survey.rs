//! PNAD Contínua dictionaries.
//!
//! Codes follow the IBGE microdata dictionary for the quarterly survey.
//! Each table lists the full documented domain of its variable; anything
//! else lands on the fallback.

use crate::dictionary::{CodeDictionary, MissingPolicy};

/// Federation units (`id_uf`), IBGE two-digit codes.
pub static UF_ABBREVIATION: CodeDictionary = CodeDictionary::new(
    "uf",
    "id_uf",
    "Federation unit abbreviation",
    &[
        (11, "RO"),
        (12, "AC"),
        (13, "AM"),
        (14, "RR"),
        (15, "PA"),
        (16, "AP"),
        (17, "TO"),
        (21, "MA"),
        (22, "PI"),
        (23, "CE"),
        (24, "RN"),
        (25, "PB"),
        (26, "PE"),
        (27, "AL"),
        (28, "SE"),
        (29, "BA"),
        (31, "MG"),
        (32, "ES"),
        (33, "RJ"),
        (35, "SP"),
        (41, "PR"),
        (42, "SC"),
        (43, "RS"),
        (50, "MS"),
        (51, "MT"),
        (52, "GO"),
        (53, "DF"),
    ],
    "NA",
    MissingPolicy::Fallback,
);

pub static UF_NAME: CodeDictionary = CodeDictionary::new(
    "uf_name",
    "id_uf",
    "Federation unit name",
    &[
        (11, "Rondônia"),
        (12, "Acre"),
        (13, "Amazonas"),
        (14, "Roraima"),
        (15, "Pará"),
        (16, "Amapá"),
        (17, "Tocantins"),
        (21, "Maranhão"),
        (22, "Piauí"),
        (23, "Ceará"),
        (24, "Rio Grande do Norte"),
        (25, "Paraíba"),
        (26, "Pernambuco"),
        (27, "Alagoas"),
        (28, "Sergipe"),
        (29, "Bahia"),
        (31, "Minas Gerais"),
        (32, "Espírito Santo"),
        (33, "Rio de Janeiro"),
        (35, "São Paulo"),
        (41, "Paraná"),
        (42, "Santa Catarina"),
        (43, "Rio Grande do Sul"),
        (50, "Mato Grosso do Sul"),
        (51, "Mato Grosso"),
        (52, "Goiás"),
        (53, "Distrito Federal"),
    ],
    "NA",
    MissingPolicy::Fallback,
);

pub static AREA: CodeDictionary = CodeDictionary::new(
    "area",
    "V1022",
    "Household situation",
    &[(1, "Urban"), (2, "Rural")],
    "NA",
    MissingPolicy::Fallback,
);

pub static SEX: CodeDictionary = CodeDictionary::new(
    "sex",
    "V2007",
    "Sex",
    &[(1, "Male"), (2, "Female")],
    "NA",
    MissingPolicy::Fallback,
);

pub static RACE: CodeDictionary = CodeDictionary::new(
    "race",
    "V2010",
    "Color or race",
    &[
        (1, "White"),
        (2, "Black"),
        (3, "Asian"),
        (4, "Pardo"),
        (5, "Indigenous"),
        (9, "Unknown"),
    ],
    "Unknown",
    MissingPolicy::Fallback,
);

pub static SCHOOL_ATTENDANCE: CodeDictionary = CodeDictionary::new(
    "school",
    "V3002",
    "Attends school or university",
    &[(1, "Yes"), (2, "No")],
    "NA",
    MissingPolicy::Fallback,
);

pub static OCCUPATION: CodeDictionary = CodeDictionary::new(
    "occupation",
    "VD4002",
    "Occupation condition in the reference week",
    &[(1, "Employed"), (2, "Unemployed"), (3, "Out of labor force")],
    "NA",
    MissingPolicy::Fallback,
);

/// Only asked of employed respondents.
pub static CONTRIBUTOR: CodeDictionary = CodeDictionary::new(
    "contributor",
    "V4032",
    "Contributes to social security in the main job",
    &[(1, "Yes"), (2, "No")],
    "NA",
    MissingPolicy::Fallback,
);

pub static EDUCATION_LEVEL: CodeDictionary = CodeDictionary::new(
    "education",
    "VD3004",
    "Highest education level attained (9-year elementary system)",
    &[
        (1, "No schooling / <1 year"),
        (2, "Incomplete Elementary"),
        (3, "Complete Elementary"),
        (4, "Incomplete High School"),
        (5, "Complete High School"),
        (6, "Incomplete Higher Education"),
        (7, "Complete Higher Education"),
    ],
    "NA",
    MissingPolicy::Fallback,
);

/// Discouraged worker (desalentado). Any code other than 1 reads as "No";
/// a missing code stays missing.
pub static DISCOURAGED: CodeDictionary = CodeDictionary::new(
    "discouraged",
    "VD4005",
    "Discouraged worker in the reference week",
    &[(1, "Yes"), (2, "No")],
    "No",
    MissingPolicy::Missing,
);
