//! Caption tracks and language label resolution.

use serde::{Deserialize, Serialize};

/// Subtitle file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionFormat {
    Srt,
}

/// A subtitle track attached to a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub format: CaptionFormat,
    pub has_cors_restrictions: bool,
    /// ISO 639-1 code, never empty.
    pub language: String,
}

/// Maps a human language label ("English") to a language code ("en").
pub trait LanguageResolver: Send + Sync {
    fn label_to_code(&self, label: &str) -> Option<String>;
}

/// The ISO 639-1 language list.
///
/// Labels match either the English name or the autonym, ignoring case. When
/// two languages share an autonym the one with the lower code wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoLanguages;

// (code, English name, autonym)
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("aa", "Afar", "Afaraf"),
    ("ab", "Abkhaz", "аҧсуа бызшәа"),
    ("ae", "Avestan", "avesta"),
    ("af", "Afrikaans", "Afrikaans"),
    ("ak", "Akan", "Akan"),
    ("am", "Amharic", "አማርኛ"),
    ("an", "Aragonese", "aragonés"),
    ("ar", "Arabic", "اَلْعَرَبِيَّةُ"),
    ("as", "Assamese", "অসমীয়া"),
    ("av", "Avaric", "авар мацӀ"),
    ("ay", "Aymara", "aymar aru"),
    ("az", "Azerbaijani", "azərbaycan dili"),
    ("ba", "Bashkir", "башҡорт теле"),
    ("be", "Belarusian", "беларуская мова"),
    ("bg", "Bulgarian", "български език"),
    ("bi", "Bislama", "Bislama"),
    ("bm", "Bambara", "bamanankan"),
    ("bn", "Bengali", "বাংলা"),
    ("bo", "Tibetan", "བོད་ཡིག"),
    ("br", "Breton", "brezhoneg"),
    ("bs", "Bosnian", "bosanski jezik"),
    ("ca", "Catalan", "Català"),
    ("ce", "Chechen", "нохчийн мотт"),
    ("ch", "Chamorro", "Chamoru"),
    ("co", "Corsican", "corsu"),
    ("cr", "Cree", "ᓀᐦᐃᔭᐍᐏᐣ"),
    ("cs", "Czech", "čeština"),
    ("cu", "Old Church Slavonic", "ѩзыкъ словѣньскъ"),
    ("cv", "Chuvash", "чӑваш чӗлхи"),
    ("cy", "Welsh", "Cymraeg"),
    ("da", "Danish", "dansk"),
    ("de", "German", "Deutsch"),
    ("dv", "Divehi", "ދިވެހި"),
    ("dz", "Dzongkha", "རྫོང་ཁ"),
    ("ee", "Ewe", "Eʋegbe"),
    ("el", "Greek", "Ελληνικά"),
    ("en", "English", "English"),
    ("eo", "Esperanto", "Esperanto"),
    ("es", "Spanish", "Español"),
    ("et", "Estonian", "eesti"),
    ("eu", "Basque", "euskara"),
    ("fa", "Persian", "فارسی"),
    ("ff", "Fula", "Fulfulde"),
    ("fi", "Finnish", "suomi"),
    ("fj", "Fijian", "vosa Vakaviti"),
    ("fo", "Faroese", "føroyskt"),
    ("fr", "French", "Français"),
    ("fy", "Western Frisian", "Frysk"),
    ("ga", "Irish", "Gaeilge"),
    ("gd", "Scottish Gaelic", "Gàidhlig"),
    ("gl", "Galician", "galego"),
    ("gn", "Guaraní", "Avañe'ẽ"),
    ("gu", "Gujarati", "ગુજરાતી"),
    ("gv", "Manx", "Gaelg"),
    ("ha", "Hausa", "هَوُسَ"),
    ("he", "Hebrew", "עברית"),
    ("hi", "Hindi", "हिन्दी"),
    ("ho", "Hiri Motu", "Hiri Motu"),
    ("hr", "Croatian", "Hrvatski"),
    ("ht", "Haitian", "Kreyòl ayisyen"),
    ("hu", "Hungarian", "magyar"),
    ("hy", "Armenian", "Հայերեն"),
    ("hz", "Herero", "Otjiherero"),
    ("ia", "Interlingua", "Interlingua"),
    ("id", "Indonesian", "Bahasa Indonesia"),
    ("ie", "Interlingue", "Interlingue"),
    ("ig", "Igbo", "Asụsụ Igbo"),
    ("ii", "Nuosu", "ꆈꌠ꒿ Nuosuhxop"),
    ("ik", "Inupiaq", "Iñupiaq"),
    ("io", "Ido", "Ido"),
    ("is", "Icelandic", "Íslenska"),
    ("it", "Italian", "Italiano"),
    ("iu", "Inuktitut", "ᐃᓄᒃᑎᑐᑦ"),
    ("ja", "Japanese", "日本語"),
    ("jv", "Javanese", "basa Jawa"),
    ("ka", "Georgian", "ქართული"),
    ("kg", "Kongo", "Kikongo"),
    ("ki", "Kikuyu", "Gĩkũyũ"),
    ("kj", "Kwanyama", "Kuanyama"),
    ("kk", "Kazakh", "қазақ тілі"),
    ("kl", "Kalaallisut", "kalaallisut"),
    ("km", "Khmer", "ខេមរភាសា"),
    ("kn", "Kannada", "ಕನ್ನಡ"),
    ("ko", "Korean", "한국어"),
    ("kr", "Kanuri", "Kanuri"),
    ("ks", "Kashmiri", "कश्मीरी"),
    ("ku", "Kurdish", "Kurdî"),
    ("kv", "Komi", "коми кыв"),
    ("kw", "Cornish", "Kernewek"),
    ("ky", "Kyrgyz", "Кыргызча"),
    ("la", "Latin", "latine"),
    ("lb", "Luxembourgish", "Lëtzebuergesch"),
    ("lg", "Ganda", "Luganda"),
    ("li", "Limburgish", "Limburgs"),
    ("ln", "Lingala", "Lingála"),
    ("lo", "Lao", "ພາສາລາວ"),
    ("lt", "Lithuanian", "lietuvių kalba"),
    ("lu", "Luba-Katanga", "Kiluba"),
    ("lv", "Latvian", "latviešu valoda"),
    ("mg", "Malagasy", "fiteny malagasy"),
    ("mh", "Marshallese", "Kajin M̧ajeļ"),
    ("mi", "Māori", "te reo Māori"),
    ("mk", "Macedonian", "македонски јазик"),
    ("ml", "Malayalam", "മലയാളം"),
    ("mn", "Mongolian", "Монгол хэл"),
    ("mr", "Marathi", "मराठी"),
    ("ms", "Malay", "Bahasa Melayu"),
    ("mt", "Maltese", "Malti"),
    ("my", "Burmese", "ဗမာစာ"),
    ("na", "Nauru", "Dorerin Naoero"),
    ("nb", "Norwegian Bokmål", "Norsk bokmål"),
    ("nd", "Northern Ndebele", "isiNdebele"),
    ("ne", "Nepali", "नेपाली"),
    ("ng", "Ndonga", "Owambo"),
    ("nl", "Dutch", "Nederlands"),
    ("nn", "Norwegian Nynorsk", "Norsk nynorsk"),
    ("no", "Norwegian", "Norsk"),
    ("nr", "Southern Ndebele", "isiNdebele"),
    ("nv", "Navajo", "Diné bizaad"),
    ("ny", "Chichewa", "chiCheŵa"),
    ("oc", "Occitan", "occitan"),
    ("oj", "Ojibwe", "ᐊᓂᔑᓈᐯᒧᐎᓐ"),
    ("om", "Oromo", "Afaan Oromoo"),
    ("or", "Oriya", "ଓଡ଼ିଆ"),
    ("os", "Ossetian", "ирон æвзаг"),
    ("pa", "Panjabi", "ਪੰਜਾਬੀ"),
    ("pi", "Pāli", "पाऴि"),
    ("pl", "Polish", "Polski"),
    ("ps", "Pashto", "پښتو"),
    ("pt", "Portuguese", "Português"),
    ("qu", "Quechua", "Runa Simi"),
    ("rm", "Romansh", "rumantsch grischun"),
    ("rn", "Kirundi", "Ikirundi"),
    ("ro", "Romanian", "Română"),
    ("ru", "Russian", "Русский"),
    ("rw", "Kinyarwanda", "Ikinyarwanda"),
    ("sa", "Sanskrit", "संस्कृतम्"),
    ("sc", "Sardinian", "sardu"),
    ("sd", "Sindhi", "सिन्धी"),
    ("se", "Northern Sami", "Davvisámegiella"),
    ("sg", "Sango", "yângâ tî sängö"),
    ("si", "Sinhala", "සිංහල"),
    ("sk", "Slovak", "slovenčina"),
    ("sl", "Slovenian", "slovenščina"),
    ("sm", "Samoan", "gagana fa'a Samoa"),
    ("sn", "Shona", "chiShona"),
    ("so", "Somali", "Soomaaliga"),
    ("sq", "Albanian", "Shqip"),
    ("sr", "Serbian", "српски језик"),
    ("ss", "Swati", "SiSwati"),
    ("st", "Southern Sotho", "Sesotho"),
    ("su", "Sundanese", "Basa Sunda"),
    ("sv", "Swedish", "Svenska"),
    ("sw", "Swahili", "Kiswahili"),
    ("ta", "Tamil", "தமிழ்"),
    ("te", "Telugu", "తెలుగు"),
    ("tg", "Tajik", "тоҷикӣ"),
    ("th", "Thai", "ไทย"),
    ("ti", "Tigrinya", "ትግርኛ"),
    ("tk", "Turkmen", "Türkmençe"),
    ("tl", "Tagalog", "Wikang Tagalog"),
    ("tn", "Tswana", "Setswana"),
    ("to", "Tonga", "faka Tonga"),
    ("tr", "Turkish", "Türkçe"),
    ("ts", "Tsonga", "Xitsonga"),
    ("tt", "Tatar", "татар теле"),
    ("tw", "Twi", "Twi"),
    ("ty", "Tahitian", "Reo Tahiti"),
    ("ug", "Uyghur", "ئۇيغۇرچە"),
    ("uk", "Ukrainian", "Українська"),
    ("ur", "Urdu", "اردو"),
    ("uz", "Uzbek", "Ўзбек"),
    ("ve", "Venda", "Tshivenḓa"),
    ("vi", "Vietnamese", "Tiếng Việt"),
    ("vo", "Volapük", "Volapük"),
    ("wa", "Walloon", "walon"),
    ("wo", "Wolof", "Wollof"),
    ("xh", "Xhosa", "isiXhosa"),
    ("yi", "Yiddish", "ייִדיש"),
    ("yo", "Yoruba", "Yorùbá"),
    ("za", "Zhuang", "Saɯ cueŋƅ"),
    ("zh", "Chinese", "中文"),
    ("zu", "Zulu", "isiZulu"),
];

impl LanguageResolver for IsoLanguages {
    fn label_to_code(&self, label: &str) -> Option<String> {
        let label = label.trim().to_lowercase();
        if label.is_empty() {
            return None;
        }
        LANGUAGES
            .iter()
            .find(|(_, name, autonym)| {
                name.to_lowercase() == label || autonym.to_lowercase() == label
            })
            .map(|(code, _, _)| (*code).to_string())
    }
}
