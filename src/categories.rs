use serde::Serialize;

/// A fixed life category drawn as one slice of the pie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    pub orbitals: &'static [&'static str],
}

/// Registry order is slice order, clockwise from the top of the pie.
pub const CATEGORIES: [Category; 8] = [
    Category {
        id: "body",
        label: "Body",
        orbitals: &["Move", "Stretch", "Hydrate"],
    },
    Category {
        id: "mind",
        label: "Mind",
        orbitals: &["Read", "Learn", "Journal"],
    },
    Category {
        id: "spirit",
        label: "Spirit",
        orbitals: &["Meditate", "Gratitude", "Nature"],
    },
    Category {
        id: "finance",
        label: "Finance",
        orbitals: &["Track", "Save", "Review"],
    },
    Category {
        id: "work",
        label: "Work",
        orbitals: &["Focus", "Plan", "Ship"],
    },
    Category {
        id: "bonds",
        label: "Bonds",
        orbitals: &["Call", "Listen", "Share"],
    },
    Category {
        id: "home",
        label: "Home",
        orbitals: &["Tidy", "Cook", "Fix"],
    },
    Category {
        id: "play",
        label: "Play",
        orbitals: &["Create", "Game", "Explore"],
    },
];

pub const SLICE_COUNT: usize = CATEGORIES.len();

pub fn by_slice(slice: usize) -> Option<&'static Category> {
    CATEGORIES.get(slice)
}

pub fn find(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.id == id)
}

pub fn is_registered(id: &str) -> bool {
    find(id).is_some()
}
