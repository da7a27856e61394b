/// Equipment layers addressable from scripts via `findlayer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    RightHand,
    LeftHand,
    Shoes,
    Pants,
    Shirt,
    Head,
    Gloves,
    Ring,
    Talisman,
    Neck,
    Hair,
    Waist,
    InnerTorso,
    Bracelet,
    Face,
    FacialHair,
    MiddleTorso,
    Earrings,
    Arms,
    Cloak,
    Backpack,
    OuterTorso,
    OuterLegs,
    InnerLegs,
}

const LAYER_TOKENS: [(&str, Layer); 24] = [
    ("righthand", Layer::RightHand),
    ("lefthand", Layer::LeftHand),
    ("shoes", Layer::Shoes),
    ("pants", Layer::Pants),
    ("shirt", Layer::Shirt),
    ("head", Layer::Head),
    ("gloves", Layer::Gloves),
    ("ring", Layer::Ring),
    ("talisman", Layer::Talisman),
    ("neck", Layer::Neck),
    ("hair", Layer::Hair),
    ("waist", Layer::Waist),
    ("innertorso", Layer::InnerTorso),
    ("bracelet", Layer::Bracelet),
    ("face", Layer::Face),
    ("facialhair", Layer::FacialHair),
    ("middletorso", Layer::MiddleTorso),
    ("earrings", Layer::Earrings),
    ("arms", Layer::Arms),
    ("cloak", Layer::Cloak),
    ("backpack", Layer::Backpack),
    ("outertorso", Layer::OuterTorso),
    ("outerlegs", Layer::OuterLegs),
    ("innerlegs", Layer::InnerLegs),
];

impl Layer {
    pub fn parse(token: &str) -> Option<Layer> {
        let token = token.trim().to_ascii_lowercase();
        LAYER_TOKENS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, layer)| *layer)
    }
}
