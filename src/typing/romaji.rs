use std::collections::HashMap;
use std::sync::LazyLock;

/// Small tsu: doubles the consonant of the following mora.
pub const GEMINATE_MARKER: &str = "っ";
/// Syllable-final n.
pub const MORAIC_NASAL: &str = "ん";

/// Spellings that type the geminate marker on its own.
pub const GEMINATE_SPELLINGS: &[&str] = &["xtu", "ltu"];
pub const NASAL_SINGLE: &str = "n";
pub const NASAL_DOUBLE: &str = "nn";

/// Leading letters after which a lone `n` would merge with the next mora.
const NASAL_AMBIGUOUS_LEADS: &[char] = &['a', 'i', 'u', 'e', 'o', 'n', 'y'];

static TABLE: LazyLock<RomajiTable> = LazyLock::new(RomajiTable::build);

/// Kana (and full-width punctuation) to the ASCII key sequences that type it.
pub struct RomajiTable {
    spellings: HashMap<&'static str, &'static [&'static str]>,
}

impl RomajiTable {
    /// The process-wide table. Built on first use, never mutated.
    pub fn global() -> &'static RomajiTable {
        &TABLE
    }

    fn build() -> Self {
        Self {
            spellings: ENTRIES.iter().copied().collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.spellings.contains_key(token)
    }

    /// Accepted spellings for `token`, or `None` for tokens typed literally
    /// (ASCII letters and anything else outside the table).
    pub fn spellings(&self, token: &str) -> Option<&'static [&'static str]> {
        self.spellings.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.spellings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spellings.is_empty()
    }
}

/// Whether a lone `n` before a mora spelled with any of `spellings` would be
/// read as part of that mora, forcing `nn`.
pub fn nasal_needs_double(spellings: &[&str]) -> bool {
    spellings.iter().any(|s| {
        s.chars()
            .next()
            .is_some_and(|c| NASAL_AMBIGUOUS_LEADS.contains(&c))
    })
}

#[rustfmt::skip]
const ENTRIES: &[(&str, &[&str])] = &[
    ("あ", &["a"]),
    ("い", &["i"]),
    ("う", &["u", "wu", "whu"]),
    ("え", &["e"]),
    ("お", &["o"]),
    ("か", &["ka", "ca"]),
    ("き", &["ki"]),
    ("く", &["ku", "cu"]),
    ("け", &["ke"]),
    ("こ", &["ko", "co"]),
    ("さ", &["sa"]),
    ("し", &["si", "ci", "shi"]),
    ("す", &["su"]),
    ("せ", &["se", "ce"]),
    ("そ", &["so"]),
    ("た", &["ta"]),
    ("ち", &["ti", "chi"]),
    ("つ", &["tu", "tsu"]),
    ("て", &["te"]),
    ("と", &["to"]),
    ("な", &["na"]),
    ("に", &["ni"]),
    ("ぬ", &["nu"]),
    ("ね", &["ne"]),
    ("の", &["no"]),
    ("は", &["ha"]),
    ("ひ", &["hi"]),
    ("ふ", &["hu", "fu"]),
    ("へ", &["he"]),
    ("ほ", &["ho"]),
    ("ま", &["ma"]),
    ("み", &["mi"]),
    ("む", &["mu"]),
    ("め", &["me"]),
    ("も", &["mo"]),
    ("や", &["ya"]),
    ("ゆ", &["yu"]),
    ("よ", &["yo"]),
    ("ら", &["ra"]),
    ("り", &["ri"]),
    ("る", &["ru"]),
    ("れ", &["re"]),
    ("ろ", &["ro"]),
    ("わ", &["wa"]),
    ("を", &["wo"]),
    ("ん", &["n", "nn"]),
    ("が", &["ga"]),
    ("ぎ", &["gi"]),
    ("ぐ", &["gu"]),
    ("げ", &["ge"]),
    ("ご", &["go"]),
    ("ざ", &["za"]),
    ("じ", &["zi", "ji"]),
    ("ず", &["zu"]),
    ("ぜ", &["ze"]),
    ("ぞ", &["zo"]),
    ("だ", &["da"]),
    ("ぢ", &["di"]),
    ("づ", &["du"]),
    ("で", &["de"]),
    ("ど", &["do"]),
    ("ば", &["ba"]),
    ("び", &["bi"]),
    ("ぶ", &["bu"]),
    ("べ", &["be"]),
    ("ぼ", &["bo"]),
    ("ぱ", &["pa"]),
    ("ぴ", &["pi"]),
    ("ぷ", &["pu"]),
    ("ぺ", &["pe"]),
    ("ぽ", &["po"]),
    ("ゔ", &["vu"]),
    ("うぁ", &["wha", "uxa", "ula"]),
    ("うぃ", &["wi", "whi", "uxi", "uli"]),
    ("うぇ", &["we", "whe", "uxe", "ule"]),
    ("うぉ", &["who", "uxo", "ulo"]),
    ("ゔぁ", &["va", "vuxa", "vula"]),
    ("ゔぃ", &["vi", "vuxi", "vuli"]),
    ("ゔぇ", &["ve", "vuxe", "vule"]),
    ("ゔぉ", &["vo", "vuxo", "vulo"]),
    ("いぇ", &["ye", "ixe", "ile"]),
    ("きゃ", &["kya", "kixya", "kilya"]),
    ("きぃ", &["kyi", "kixi", "kili"]),
    ("きゅ", &["kyu", "kixyu", "kilyu"]),
    ("きぇ", &["kye", "kixe", "kile"]),
    ("きょ", &["kyo", "kilyo", "kixyo"]),
    ("ぎゃ", &["gya", "gilya", "gixya"]),
    ("ぎぃ", &["gyi", "gixi", "gili"]),
    ("ぎゅ", &["gyu", "gilyu", "gixyu"]),
    ("ぎぇ", &["gye", "gile", "gixe"]),
    ("ぎょ", &["gyo", "gixyo", "gilyo"]),
    ("しゃ", &["sya", "sha", "cixya", "silya", "sixya", "cilya", "shilya", "shixya"]),
    ("しぃ", &["syi", "cixi", "sili", "cili", "sixi", "shixi", "shili"]),
    ("しゅ", &["syu", "shu", "sixyu", "cixyu", "silyu", "cilyu", "shixyu", "shilyu"]),
    ("しぇ", &["sye", "she", "sixe", "cile", "sile", "cixe", "shile", "shixe"]),
    ("しょ", &["sho", "syo", "cixyo", "cilyo", "sixyo", "silyo", "shixyo", "shilyo"]),
    ("じゃ", &["ja", "jya", "zya", "zilya", "zixya", "jixya", "jilya"]),
    ("じぃ", &["zyi", "jyi", "zili", "jixi", "zixi", "jili"]),
    ("じゅ", &["ju", "jyu", "zyu", "jilyu", "jixyu", "zilyu", "zixyu"]),
    ("じぇ", &["je", "zye", "jye", "zile", "jixe", "jile", "zixe"]),
    ("じょ", &["jo", "zyo", "jyo", "jilyo", "zixyo", "jixyo", "zilyo"]),
    ("ちゃ", &["cha", "cya", "tya", "tixya", "tilya", "chilya", "chixya"]),
    ("ちぃ", &["cyi", "tyi", "tili", "tixi", "chixi", "chili"]),
    ("ちゅ", &["chu", "cyu", "tyu", "tilyu", "tixyu", "chilyu", "chixyu"]),
    ("ちぇ", &["che", "cye", "tye", "tixe", "tile", "chile", "chixe"]),
    ("ちょ", &["cho", "cyo", "tyo", "tixyo", "tilyo", "chixyo", "chilyo"]),
    ("ぢゃ", &["dya", "dilya", "dixya"]),
    ("ぢぃ", &["dyi", "dixi", "dili"]),
    ("ぢゅ", &["dyu", "dixyu", "dilyu"]),
    ("ぢぇ", &["dye", "dile", "dixe"]),
    ("ぢょ", &["dyo", "dixyo", "dilyo"]),
    ("てゃ", &["tha", "texya", "telya"]),
    ("てぃ", &["thi", "teli", "texi"]),
    ("てゅ", &["thu", "texyu", "telyu"]),
    ("てぇ", &["the", "tele", "texe"]),
    ("てょ", &["tho", "texyo", "telyo"]),
    ("でゃ", &["dha", "dexya", "delya"]),
    ("でぃ", &["dhi", "deli", "dexi"]),
    ("でゅ", &["dhu", "dexyu", "delyu"]),
    ("でぇ", &["dhe", "dele", "dexe"]),
    ("でょ", &["dho", "delyo", "dexyo"]),
    ("にゃ", &["nya", "nilya", "nixya"]),
    ("にぃ", &["nyi", "nili", "nixi"]),
    ("にゅ", &["nyu", "nixyu", "nilyu"]),
    ("にぇ", &["nye", "nixe", "nile"]),
    ("にょ", &["nyo", "nilyo", "nixyo"]),
    ("ひゃ", &["hya", "hilya", "hixya"]),
    ("ひぃ", &["hyi", "hili", "hixi"]),
    ("ひゅ", &["hyu", "hixyu", "hilyu"]),
    ("ひぇ", &["hye", "hile", "hixe"]),
    ("ひょ", &["hyo", "hixyo", "hilyo"]),
    ("びゃ", &["bya", "bixya", "bilya"]),
    ("びぃ", &["byi", "bili", "bixi"]),
    ("びゅ", &["byu", "bixyu", "bilyu"]),
    ("びぇ", &["bye", "bile", "bixe"]),
    ("びょ", &["byo", "bixyo", "bilyo"]),
    ("ぴゃ", &["pya", "pilya", "pixya"]),
    ("ぴぃ", &["pyi", "pixi", "pili"]),
    ("ぴゅ", &["pyu", "pilyu", "pixyu"]),
    ("ぴぇ", &["pye", "pixe", "pile"]),
    ("ぴょ", &["pyo", "pilyo", "pixyo"]),
    ("ふぁ", &["fa", "hula", "fula", "huxa", "fuxa"]),
    ("ふぃ", &["fi", "fuxi", "huxi", "fuli", "huli"]),
    ("ふぇ", &["fe", "fuxe", "huxe", "fule", "hule"]),
    ("ふぉ", &["fo", "fuxo", "hulo", "fulo", "huxo"]),
    ("ふゃ", &["fya", "hulya", "fuxya", "fulya", "huxya"]),
    ("ふょ", &["fyo", "fulyo", "huxyo", "fuxyo", "hulyo"]),
    ("みゃ", &["mya", "mixya", "milya"]),
    ("みぃ", &["myi", "mili", "mixi"]),
    ("みゅ", &["myu", "milyu", "mixyu"]),
    ("みぇ", &["mye", "mile", "mixe"]),
    ("みょ", &["myo", "mixyo", "milyo"]),
    ("りゃ", &["rya", "rilya", "rixya"]),
    ("りぃ", &["ryi", "rili", "rixi"]),
    ("りゅ", &["ryu", "rilyu", "rixyu"]),
    ("りぇ", &["rye", "rixe", "rile"]),
    ("りょ", &["ryo", "rilyo", "rixyo"]),
    ("とぅ", &["twu", "tolu", "toxu"]),
    ("どぅ", &["dwu", "dolu", "doxu"]),
    ("ぁ", &["xa", "la"]),
    ("ぃ", &["xi", "li"]),
    ("ぅ", &["xu", "lu"]),
    ("ぇ", &["xe", "le"]),
    ("ぉ", &["xo", "lo"]),
    ("ゃ", &["xya", "lya"]),
    ("ゅ", &["xyu", "lyu"]),
    ("ょ", &["xyo", "lyo"]),
    ("ゎ", &["xwa", "lwa"]),
    ("っ", &["xtu", "ltu"]),
    ("ー", &["-"]),
    ("、", &[","]),
    ("。", &["."]),
    ("？", &["?"]),
    ("！", &["!"]),
    ("〜", &["~"]),
    ("（", &["("]),
    ("）", &[")"]),
    ("「", &["["]),
    ("」", &["]"]),
    ("・", &["/"]),
    ("；", &[";"]),
    ("：", &[":"]),
    ("　", &[" "]),
];
