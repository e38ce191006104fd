//! Classification of a flat section into toggle-rooted groups.
//!
//! Keys are claimed by a fixed sequence of passes; a key claimed by an
//! earlier pass is invisible to later ones:
//!
//! 1. boolean roots (`$name`, no `_`) and the children their rule selects,
//! 2. synthetic groups matched by substring,
//! 3. the debug group, if the debug toggle exists,
//! 4. everything left over is standalone.
//!
//! Keys are visited in sorted order, so the result depends only on the key
//! set and the rule tables, never on the section's insertion order.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::HashSet;

use crate::document::{Section, Value};

/// A predicate over field keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    Prefix(&'static str),
    Contains(&'static str),
}

impl KeyPattern {
    pub fn matches(self, key: &str) -> bool {
        match self {
            KeyPattern::Prefix(prefix) => key.starts_with(prefix),
            KeyPattern::Contains(needle) => key.contains(needle),
        }
    }
}

/// Child selection for a root with a non-generic naming convention.
#[derive(Debug)]
pub struct RootRule {
    /// Root base name (the toggle key without `$`).
    pub base: &'static str,
    pub children: &'static [KeyPattern],
}

/// A substring rule feeding a root-less group.
#[derive(Debug)]
pub struct SyntheticRule {
    pub group: &'static str,
    /// Matched against the lowercased key.
    pub pattern: &'static str,
}

use KeyPattern::{Contains, Prefix};

pub const ROOT_RULES: &[RootRule] = &[
    RootRule {
        base: "coordinates",
        children: &[
            Prefix("$coordinates_"),
            Contains("vanillacordinates"),
            Contains("chunk_coordinates"),
            Contains("nether_coordinates"),
            Contains("nether_in_overworld"),
            Contains("show_chunkcoordinates"),
            Contains("show_nethercoordinates"),
            Contains("hide_chunkcoordinates"),
            Contains("hide_nethercoordinates"),
            Contains("hide_vanillacordinates"),
        ],
    },
    RootRule {
        base: "clockcompass",
        children: &[
            Prefix("$clockcompass_"),
            Contains("compass_aux"),
            Contains("clock_aux"),
            Contains("recovery_compass_aux"),
            Contains("show_clock_compass"),
        ],
    },
    RootRule {
        base: "mobileshortcuts",
        children: &[
            Contains("f1button"),
            Contains("f8button"),
            Contains("hotbar_left_button"),
            Contains("hotbar_right_button"),
        ],
    },
    RootRule {
        base: "mainhandhud",
        children: &[
            Prefix("$mainhandhud_"),
            Contains("mainhand_durability_toggle_index"),
            Contains("hide_mainhandhud"),
            Contains("mainhandhud_slot_opacity"),
        ],
    },
    RootRule {
        base: "chunkmap",
        children: &[
            Prefix("$chunkmap_"),
            Contains("hide_slime_chunks"),
            Contains("chunkmap_chunk_position"),
        ],
    },
    RootRule {
        base: "playerlist",
        children: &[
            Prefix("$playerlist_"),
            Contains("hide_playeravatars"),
            Contains("playerlist_mobile_button"),
        ],
    },
    RootRule {
        base: "hotbar",
        children: &[
            Prefix("$hotbar_"),
            Contains("hide_hotbar"),
            Contains("hide_inventory_button"),
            Contains("show_hotbar_numbers"),
            Contains("hotbar_toggle_index"),
        ],
    },
];

pub const SYNTHETIC_RULES: &[SyntheticRule] = &[
    SyntheticRule { group: "bossbar", pattern: "boss" },
    SyntheticRule { group: "scoreboard", pattern: "scoreboard" },
    SyntheticRule { group: "crosshair", pattern: "crosshair" },
    SyntheticRule { group: "exp_bar", pattern: "xp_bar" },
    SyntheticRule { group: "exp_bar", pattern: "xp_percentage" },
    SyntheticRule { group: "saturation_display", pattern: "display" },
    SyntheticRule { group: "saturation_display", pattern: "saturation" },
    SyntheticRule { group: "saturation_display", pattern: "nightshift" },
    SyntheticRule { group: "text_visibility", pattern: "hide_item_name" },
    SyntheticRule { group: "text_visibility", pattern: "hide_jukebox" },
    SyntheticRule { group: "text_visibility", pattern: "hide_tip" },
    SyntheticRule { group: "text_visibility", pattern: "hide_actionbar" },
];

/// Toggle that roots the debug group.
pub const DEBUG_TOGGLE: &str = "$debughud";
pub const DEBUG_GROUP: &str = "debughud";

/// Field names shown by the debug HUD.
pub const DEBUG_FIELDS: &[&str] = &[
    "glacierversion",
    "version",
    "os_type",
    "graphics",
    "platform",
    "ui_type",
    "world_type",
    "world_name",
    "day_counter",
    "moon_phase",
    "gamemode",
    "xp_level",
    "item_id",
    "item_aux_id",
];

/// A cluster of related keys under an optional enabling toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: String,
    /// Enabling toggle key. `None` means the group is always enabled.
    pub root: Option<String>,
    pub children: IndexSet<String>,
}

impl Group {
    fn new(id: &str, root: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            root: root.map(str::to_string),
            children: IndexSet::new(),
        }
    }

    /// Whether the group's settings are active in `section`.
    pub fn is_enabled(&self, section: &Section) -> bool {
        match &self.root {
            Some(root) => section.get(root).and_then(Value::as_bool) == Some(true),
            None => true,
        }
    }

    /// Case-insensitive match of a search term against the id and children.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.id.to_lowercase().contains(&term)
            || self
                .children
                .iter()
                .any(|child| child.to_lowercase().contains(&term))
    }

    /// Display title: the id with underscores as spaces.
    pub fn title(&self) -> String {
        self.id.replace('_', " ")
    }
}

/// Result of classifying one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Groups in order of first creation.
    pub groups: Vec<Group>,
    pub standalones: Vec<String>,
}

impl Classification {
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// Standalone keys matching a case-insensitive search term.
    pub fn visible_standalones<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a str> {
        let term = term.to_lowercase();
        self.standalones
            .iter()
            .map(String::as_str)
            .filter(move |key| key.to_lowercase().contains(&term))
    }
}

fn is_root(key: &str, value: &Value) -> bool {
    key.starts_with('$') && !key.contains('_') && matches!(value, Value::Bool(_))
}

/// Whether `key` belongs to the group of `root` (`$base`).
fn is_child_of(root: &str, base: &str, key: &str) -> bool {
    match ROOT_RULES.iter().find(|rule| rule.base == base) {
        Some(rule) => rule.children.iter().any(|pattern| pattern.matches(key)),
        None => {
            key.strip_prefix(root)
                .is_some_and(|rest| rest.starts_with('_'))
                || key.starts_with(&format!("$hide_{base}"))
                || key.starts_with(&format!("$show_{base}"))
        }
    }
}

/// Partition a section's keys into groups and standalones.
pub fn classify(section: &Section) -> Classification {
    let mut keys: Vec<&str> = section.keys().map(String::as_str).collect();
    keys.sort_unstable();

    let mut groups: IndexMap<String, Group> = IndexMap::new();
    let mut claimed: HashSet<&str> = HashSet::new();

    // Pass 1: boolean roots. Every root is claimed before any children so a
    // root can never end up as another root's child.
    let roots: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| section.get(*key).is_some_and(|value| is_root(key, value)))
        .collect();
    claimed.extend(roots.iter().copied());

    for root in &roots {
        let base = &root[1..];
        let children: Vec<&str> = keys
            .iter()
            .copied()
            .filter(|key| !claimed.contains(key) && is_child_of(root, base, key))
            .collect();
        claimed.extend(children.iter().copied());

        let group = groups
            .entry(base.to_string())
            .or_insert_with(|| Group::new(base, Some(*root)));
        group.children.extend(children.into_iter().map(str::to_string));
    }

    // Pass 2: synthetic groups.
    for rule in SYNTHETIC_RULES {
        let matches: Vec<&str> = keys
            .iter()
            .copied()
            .filter(|key| !claimed.contains(key) && key.to_lowercase().contains(rule.pattern))
            .collect();
        if matches.is_empty() {
            continue;
        }
        claimed.extend(matches.iter().copied());

        let group = groups
            .entry(rule.group.to_string())
            .or_insert_with(|| Group::new(rule.group, None));
        group.children.extend(matches.into_iter().map(str::to_string));
    }

    // Pass 3: debug HUD fields.
    if section.contains_key(DEBUG_TOGGLE) {
        let debug_children: Vec<&str> = keys
            .iter()
            .copied()
            .filter(|key| {
                !claimed.contains(key)
                    && *key != DEBUG_TOGGLE
                    && DEBUG_FIELDS.iter().any(|field| key.contains(field))
            })
            .collect();
        claimed.extend(debug_children.iter().copied());
        claimed.insert(DEBUG_TOGGLE);

        let group = groups
            .entry(DEBUG_GROUP.to_string())
            .or_insert_with(|| Group::new(DEBUG_GROUP, Some(DEBUG_TOGGLE)));
        group
            .children
            .extend(debug_children.into_iter().map(str::to_string));
    }

    // Pass 4: residual.
    let standalones: Vec<String> = keys
        .iter()
        .filter(|key| !claimed.contains(*key))
        .map(|key| key.to_string())
        .collect();

    log::debug!(
        "Classified {} keys into {} groups and {} standalones",
        keys.len(),
        groups.len(),
        standalones.len()
    );

    Classification {
        groups: groups.into_values().collect(),
        standalones,
    }
}
