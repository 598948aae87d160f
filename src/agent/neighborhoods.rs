/// Family-friendly neighborhoods and the top schools near each, in search order.
pub const NEIGHBORHOOD_SCHOOLS: &[(&str, &[&str])] = &[
    (
        "arabian ranches",
        &[
            "JESS (Jumeirah English Speaking School)",
            "Nord Anglia International School",
            "Ranches Primary School",
            "Ranches Nursery",
        ],
    ),
    (
        "dubai hills estate",
        &[
            "GEMS World Academy",
            "Safa Community School",
            "Kings' School Al Barsha",
            "GEMS Wellington Academy",
            "GEMS International School",
            "Brighton College Dubai",
            "Dubai Heights Academy",
            "GEMS New Millennium School",
        ],
    ),
    (
        "mirdif",
        &[
            "GEMS Royal Dubai School",
            "Dar Al Marefa",
            "Uptown International School",
        ],
    ),
    (
        "jumeirah",
        &[
            "Dubai International Academy",
            "Jumeirah College",
            "GEMS Jumeirah Primary School",
        ],
    ),
    (
        "palm jumeirah",
        &[
            "Dubai American Academy",
            "Swiss International Scientific School",
        ],
    ),
    ("al furjan", &["Arbor School"]),
    (
        "emirates hills",
        &[
            "Dubai British School",
            "Emirates International School",
            "GEMS Wellington Academy",
        ],
    ),
];

pub fn all() -> impl Iterator<Item = &'static str> {
    NEIGHBORHOOD_SCHOOLS.iter().map(|(name, _)| *name)
}

pub fn schools(neighborhood: &str) -> &'static [&'static str] {
    NEIGHBORHOOD_SCHOOLS
        .iter()
        .find(|(name, _)| *name == neighborhood)
        .map(|(_, schools)| *schools)
        .unwrap_or(&[])
}

/// "dubai hills estate" -> "Dubai Hills Estate"
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
