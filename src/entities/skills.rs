#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkillId(pub u8);

/// Lock direction for a skill's gain arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockDirection {
    Up,
    Down,
    Locked,
}

impl LockDirection {
    pub fn parse(token: &str) -> Option<LockDirection> {
        match token.trim().to_ascii_lowercase().as_str() {
            "up" => Some(LockDirection::Up),
            "down" => Some(LockDirection::Down),
            "lock" => Some(LockDirection::Locked),
            _ => None,
        }
    }
}

const SKILL_NAMES: [&str; 55] = [
    "alchemy",
    "anatomy",
    "animallore",
    "itemid",
    "armslore",
    "parry",
    "begging",
    "blacksmith",
    "fletching",
    "peacemaking",
    "camping",
    "carpentry",
    "cartography",
    "cooking",
    "detecthidden",
    "discordance",
    "evalint",
    "healing",
    "fishing",
    "forensics",
    "herding",
    "hiding",
    "provocation",
    "inscription",
    "lockpicking",
    "magery",
    "magicresist",
    "tactics",
    "snooping",
    "musicianship",
    "poisoning",
    "archery",
    "spiritspeak",
    "stealing",
    "tailoring",
    "animaltaming",
    "tasteid",
    "tinkering",
    "tracking",
    "veterinary",
    "swords",
    "macefighting",
    "fencing",
    "wrestling",
    "lumberjacking",
    "mining",
    "meditation",
    "stealth",
    "removetrap",
    "necromancy",
    "focus",
    "chivalry",
    "bushido",
    "ninjitsu",
    "spellweaving",
];

/// Look up a skill by its script token. Case-insensitive.
pub fn skill_by_name(name: &str) -> Option<SkillId> {
    let name = name.trim().to_ascii_lowercase();
    SKILL_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .map(|index| SkillId(index as u8))
}
