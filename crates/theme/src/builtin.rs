use tracing::warn;

use crate::catalog::{parse_catalog_toml, NamedPalette};

const BUILTIN_PALETTES: &str = r##"
[[palettes]]
name = "Sunset Dreams"
colors = ["#FF6B6B", "#FECA57", "#FF9F43", "#FFD93D", "#2ED573"]
hubs = ["warm", "summer", "orange", "yellow"]
tags = ["warm", "vibrant", "marketing"]

[[palettes]]
name = "Calm Pastures"
colors = ["#2D6A4F", "#95D5B2", "#B7E4C7", "#FFFFFF", "#1B4332"]
hubs = ["green", "nature", "earth-tones", "minimalist"]
tags = ["calm", "brand", "neutral"]

[[palettes]]
name = "Pastel Sky"
colors = ["#BBDCE5", "#ECEEDF", "#D9C4B0", "#CFAB8D", "#9EC1CF"]
hubs = ["pastel", "wedding", "beige"]
tags = ["soft", "pastel", "wedding"]

[[palettes]]
name = "Harbor Lights"
colors = ["#0B3954", "#087E8B", "#BFD7EA", "#FF5A5F", "#C81D25"]
hubs = ["blue", "cool", "summer"]
tags = ["nautical", "contrast"]

[[palettes]]
name = "Midnight Neon"
colors = ["#0D0221", "#261447", "#FF3864", "#2DE2E6", "#F6019D"]
hubs = ["dark", "neon", "purple", "pink"]
tags = ["retro", "synthwave", "dark"]

[[palettes]]
name = "Forest Floor"
colors = ["#283618", "#606C38", "#FEFAE0", "#DDA15E", "#BC6C25"]
hubs = ["green", "brown", "earth-tones", "autumn", "nature"]
tags = ["organic", "rustic"]

[[palettes]]
name = "Latte Foam"
colors = ["#EDE0D4", "#E6CCB2", "#DDB892", "#B08968", "#7F5539"]
hubs = ["beige", "brown", "warm", "muted", "winter"]
tags = ["coffee", "cozy", "neutral"]

[[palettes]]
name = "Grape Soda"
colors = ["#10002B", "#3C096C", "#7B2CBF", "#C77DFF", "#E0AAFF"]
hubs = ["purple", "dark", "luxury"]
tags = ["gradient", "bold"]

[[palettes]]
name = "Slate Office"
colors = ["#F8F9FA", "#DEE2E6", "#ADB5BD", "#495057", "#212529"]
hubs = ["grey", "minimalist", "muted", "white"]
tags = ["ui", "neutral", "corporate"]
"##;

pub fn get_builtin_palettes() -> Vec<NamedPalette> {
    match parse_catalog_toml(BUILTIN_PALETTES, true) {
        Ok(palettes) => palettes,
        Err(e) => {
            warn!(error = %e, "builtin palette catalog failed to parse");
            Vec::new()
        }
    }
}
