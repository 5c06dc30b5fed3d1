//! Fixed query vocabulary.
//!
//! Every image request picks one of these terms at random. The list is
//! compiled in and never mutated; duplicates are kept as shipped, which
//! slightly raises the odds of the repeated term.

/// Query terms sent to the image search provider.
pub const QUERY_TERMS: &[&str] = &[
    "glitch art",
    "dark aesthetic",
    "cyberpunk",
    "neon lights",
    "vaporwave",
    "synthwave",
    "dark mode",
    "high contrast",
    "abstract dark",
    "digital art",
    "pixel art",
    "retro dark",
    "noir",
    "monochrome",
    "dark minimalism",
    "glitch effect",
    "dark fantasy",
    "gothic",
    "dark architecture",
    "neon aesthetic",
    "dark city",
    "night photography",
    "dark abstract",
    "contrast photography",
    "dark textures",
    "glitch aesthetic",
    "dark patterns",
    "neon aesthetic",
    "dark mood",
    "high contrast photography",
    "dark cyber",
    "glitchy",
    "dark neon",
    "minimalist dark",
    "dark geometric",
    "neon glow",
    "dark surreal",
    "glitchcore",
    "dark futuristic",
    "neon city",
    "dark minimal",
    "high contrast art",
    "dark digital",
    "neon art",
    "glitch photography",
    "dark modern",
    "neon abstract",
    "dark tech",
    "contrast art",
    "dark visual",
    "red neon",
    "blue cyberpunk",
    "purple glitch",
    "green neon",
    "cyan aesthetic",
    "magenta dark",
    "orange glow",
    "yellow neon",
    "pink cyber",
    "red cyberpunk",
    "blue neon lights",
    "purple vaporwave",
    "green glitch",
    "cyan synthwave",
    "magenta aesthetic",
    "orange dark",
    "yellow glow",
    "pink neon",
    "red dark aesthetic",
    "blue glitch art",
    "purple cyberpunk",
    "green neon city",
    "cyan dark mode",
    "magenta high contrast",
    "orange abstract dark",
    "yellow digital art",
    "pink pixel art",
    "red retro dark",
    "blue noir",
    "purple monochrome",
    "green dark minimalism",
    "cyan glitch effect",
    "magenta dark fantasy",
    "orange gothic",
    "yellow dark architecture",
    "pink neon aesthetic",
    "red dark city",
    "blue night photography",
    "purple dark abstract",
    "green contrast photography",
    "cyan dark textures",
    "magenta glitch aesthetic",
    "orange dark patterns",
    "yellow dark mood",
    "pink high contrast photography",
    "red dark cyber",
    "blue glitchy",
    "purple dark neon",
    "green minimalist dark",
    "cyan dark geometric",
    "magenta neon glow",
    "orange dark surreal",
    "yellow glitchcore",
    "pink dark futuristic",
    "red neon city",
    "blue dark minimal",
    "purple high contrast art",
    "green dark digital",
    "cyan neon art",
    "magenta glitch photography",
    "orange dark modern",
    "yellow neon abstract",
    "pink dark tech",
    "red contrast art",
    "blue dark visual",
    "electric blue",
    "neon red",
    "cyber purple",
    "glitch green",
    "dark cyan",
    "neon magenta",
    "vaporwave orange",
    "synthwave yellow",
    "aesthetic pink",
    "dark red",
    "neon blue",
    "cyber green",
    "glitch cyan",
    "dark magenta",
    "neon orange",
    "vaporwave yellow",
    "synthwave pink",
];
