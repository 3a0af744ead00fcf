//! Morphological analysis: the adapter seam and a best-effort analyzer.
//!
//! The pipeline never inspects raw words directly; it asks a [`MorphAnalyzer`]
//! for part of speech, normal form, gender, number, case, animacy, and
//! grammatical person. The analyzer contract is total: it must return a
//! best-effort [`MorphAnalysis`] for any input, surfacing unknown attributes
//! as `Unspecified`, which every agreement check treats as a wildcard.
//!
//! [`RuMorph`] is the shipped implementation: a closed-class lookup table
//! covering every pronoun form the lexicons know (fully tagged), function
//! words, common adverbs, and a small animate-noun list, backed by suffix
//! heuristics for open-class words. It trades dictionary coverage for zero
//! runtime dependencies; callers needing a full dictionary can implement
//! [`MorphAnalyzer`] over one and hand it to the resolver.

use serde::{Deserialize, Serialize};

/// Coarse part of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    /// Noun (common or proper).
    Noun,
    /// Noun-like pronoun (я, ты, он, кто, себя, ...).
    Pronoun,
    /// Verb, including infinitives.
    Verb,
    /// Adjective, including adjectival pronouns (мой, который, ...).
    Adjective,
    /// Adverb.
    Adverb,
    /// Function word: preposition, conjunction, particle, determiner.
    Function,
    /// Could not be classified.
    Unspecified,
}

/// Grammatical gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Masculine.
    Masc,
    /// Feminine.
    Femn,
    /// Neuter.
    Neut,
    /// Unknown; wildcard in agreement checks.
    Unspecified,
}

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Number {
    /// Singular.
    Singular,
    /// Plural.
    Plural,
    /// Unknown; wildcard in agreement checks.
    Unspecified,
}

/// Grammatical case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Case {
    /// Nominative.
    Nominative,
    /// Genitive.
    Genitive,
    /// Dative.
    Dative,
    /// Accusative.
    Accusative,
    /// Instrumental.
    Instrumental,
    /// Prepositional/locative.
    Prepositional,
    /// Unknown.
    Unspecified,
}

/// Animacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Animacy {
    /// Animate.
    Animate,
    /// Inanimate.
    Inanimate,
    /// Unknown.
    Unspecified,
}

/// Grammatical person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    /// First person.
    First,
    /// Second person.
    Second,
    /// Third person.
    Third,
    /// Unknown or not applicable.
    Unspecified,
}

impl Gender {
    /// Agreement with wildcard semantics: `Unspecified` matches anything.
    #[must_use]
    pub fn agrees(self, other: Gender) -> bool {
        self == other || self == Gender::Unspecified || other == Gender::Unspecified
    }
}

impl Number {
    /// Agreement with wildcard semantics: `Unspecified` matches anything.
    #[must_use]
    pub fn agrees(self, other: Number) -> bool {
        self == other || self == Number::Unspecified || other == Number::Unspecified
    }
}

/// Best-effort analysis of a single word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphAnalysis {
    /// Coarse part of speech.
    pub pos: PosTag,
    /// Normal (dictionary) form, normalized (lowercase, ё→е).
    pub normal: String,
    /// Gender of this form.
    pub gender: Gender,
    /// Number of this form.
    pub number: Number,
    /// Case of this form.
    pub case: Case,
    /// Animacy of this form.
    pub animacy: Animacy,
    /// Grammatical person (pronouns only).
    pub person: Person,
}

impl MorphAnalysis {
    fn unknown(normal: String) -> Self {
        Self {
            pos: PosTag::Unspecified,
            normal,
            gender: Gender::Unspecified,
            number: Number::Unspecified,
            case: Case::Unspecified,
            animacy: Animacy::Unspecified,
            person: Person::Unspecified,
        }
    }

    /// Whether this word is in subject-compatible nominative case.
    #[must_use]
    pub fn is_nominative(&self) -> bool {
        self.case == Case::Nominative
    }
}

/// Morphology adapter consumed by every pipeline component.
///
/// Implementations must be total: any string, including garbage, gets a
/// best-effort answer. `Send + Sync` so a resolver can be shared across
/// threads for the parallel resolution pass.
pub trait MorphAnalyzer: Send + Sync {
    /// Analyze a single word.
    fn analyze(&self, word: &str) -> MorphAnalysis;

    /// Part of speech shortcut.
    fn pos(&self, word: &str) -> PosTag {
        self.analyze(word).pos
    }
}

/// Normalize a word for lexicon membership and frequency counting:
/// lowercase with ё folded to е.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase().replace('ё', "е")
}

/// Built-in rule-based analyzer for Russian.
#[derive(Debug, Clone, Default)]
pub struct RuMorph;

impl RuMorph {
    /// Create a new analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MorphAnalyzer for RuMorph {
    fn analyze(&self, word: &str) -> MorphAnalysis {
        let norm = normalize_word(word);
        if norm.is_empty() || !norm.chars().next().is_some_and(|c| c.is_alphabetic()) {
            return MorphAnalysis::unknown(norm);
        }
        if let Some(closed) = closed_class(&norm) {
            return closed;
        }
        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        open_class(&norm, capitalized)
    }
}

// Tag constructor, short because the tables below repeat it a lot.
#[allow(clippy::too_many_arguments)]
fn tags(
    pos: PosTag,
    normal: &str,
    gender: Gender,
    number: Number,
    case: Case,
    animacy: Animacy,
    person: Person,
) -> MorphAnalysis {
    MorphAnalysis {
        pos,
        normal: normal.to_string(),
        gender,
        number,
        case,
        animacy,
        person,
    }
}

/// Fully-tagged closed-class forms: pronouns, function words, adverbs.
fn closed_class(norm: &str) -> Option<MorphAnalysis> {
    use Animacy::{Animate, Unspecified as AnimU};
    use Case::*;
    use Gender::{Femn, Masc, Neut, Unspecified as GU};
    use Number::{Plural, Singular, Unspecified as NU};
    use Person::{First, Second, Third, Unspecified as PU};
    use PosTag::{Adverb, Function, Pronoun};

    // Personal pronouns, one arm per form family.
    let a = match norm {
        "я" => tags(Pronoun, "я", GU, Singular, Nominative, Animate, First),
        "меня" => tags(Pronoun, "я", GU, Singular, Genitive, Animate, First),
        "мне" => tags(Pronoun, "я", GU, Singular, Dative, Animate, First),
        "мной" | "мною" => tags(Pronoun, "я", GU, Singular, Instrumental, Animate, First),
        "мы" => tags(Pronoun, "мы", GU, Plural, Nominative, Animate, First),
        "нас" => tags(Pronoun, "мы", GU, Plural, Genitive, Animate, First),
        "нам" => tags(Pronoun, "мы", GU, Plural, Dative, Animate, First),
        "нами" => tags(Pronoun, "мы", GU, Plural, Instrumental, Animate, First),
        "ты" => tags(Pronoun, "ты", GU, Singular, Nominative, Animate, Second),
        "тебя" => tags(Pronoun, "ты", GU, Singular, Genitive, Animate, Second),
        "тебе" => tags(Pronoun, "ты", GU, Singular, Dative, Animate, Second),
        "тобой" | "тобою" => tags(Pronoun, "ты", GU, Singular, Instrumental, Animate, Second),
        "вы" => tags(Pronoun, "вы", GU, Plural, Nominative, Animate, Second),
        "вас" => tags(Pronoun, "вы", GU, Plural, Genitive, Animate, Second),
        "вам" => tags(Pronoun, "вы", GU, Plural, Dative, Animate, Second),
        "вами" => tags(Pronoun, "вы", GU, Plural, Instrumental, Animate, Second),
        "он" => tags(Pronoun, "он", Masc, Singular, Nominative, AnimU, Third),
        "него" => tags(Pronoun, "он", Masc, Singular, Genitive, AnimU, Third),
        "ему" | "нему" => tags(Pronoun, "он", Masc, Singular, Dative, AnimU, Third),
        "ним" => tags(Pronoun, "он", Masc, Singular, Instrumental, AnimU, Third),
        "нем" => tags(Pronoun, "он", Masc, Singular, Prepositional, AnimU, Third),
        "она" => tags(Pronoun, "она", Femn, Singular, Nominative, AnimU, Third),
        "нее" => tags(Pronoun, "она", Femn, Singular, Genitive, AnimU, Third),
        "ей" | "ней" => tags(Pronoun, "она", Femn, Singular, Dative, AnimU, Third),
        "ею" | "нею" => tags(Pronoun, "она", Femn, Singular, Instrumental, AnimU, Third),
        "оно" => tags(Pronoun, "оно", Neut, Singular, Nominative, AnimU, Third),
        "они" => tags(Pronoun, "они", GU, Plural, Nominative, AnimU, Third),
        "них" => tags(Pronoun, "они", GU, Plural, Genitive, AnimU, Third),
        "им" => tags(Pronoun, "они", GU, Plural, Dative, AnimU, Third),
        "ими" | "ними" => tags(Pronoun, "они", GU, Plural, Instrumental, AnimU, Third),
        // Syncretic personal/possessive forms; the classifier disambiguates,
        // the tags describe the personal reading.
        "его" => tags(Pronoun, "он", Masc, Singular, Genitive, AnimU, Third),
        "ее" => tags(Pronoun, "она", Femn, Singular, Genitive, AnimU, Third),
        "их" => tags(Pronoun, "они", GU, Plural, Genitive, AnimU, Third),
        // Reflexive; no nominative, no inherent gender or number.
        "себя" => tags(Pronoun, "себя", GU, NU, Genitive, Animate, PU),
        "себе" => tags(Pronoun, "себя", GU, NU, Dative, Animate, PU),
        "собой" | "собою" => tags(Pronoun, "себя", GU, NU, Instrumental, Animate, PU),
        // Noun-like relatives.
        "кто" => tags(Pronoun, "кто", Masc, Singular, Nominative, Animate, PU),
        "кого" => tags(Pronoun, "кто", Masc, Singular, Genitive, Animate, PU),
        "кому" => tags(Pronoun, "кто", Masc, Singular, Dative, Animate, PU),
        "кем" => tags(Pronoun, "кто", Masc, Singular, Instrumental, Animate, PU),
        "ком" => tags(Pronoun, "кто", Masc, Singular, Prepositional, Animate, PU),
        "что" => tags(Pronoun, "что", Neut, Singular, Nominative, Animacy::Inanimate, PU),
        "чего" => tags(Pronoun, "что", Neut, Singular, Genitive, Animacy::Inanimate, PU),
        "чему" => tags(Pronoun, "что", Neut, Singular, Dative, Animacy::Inanimate, PU),
        "чем" => tags(Pronoun, "что", Neut, Singular, Instrumental, Animacy::Inanimate, PU),
        _ => {
            if let Some(adjectival) = adjectival_pronoun(norm) {
                return Some(adjectival);
            }
            if FUNCTION_WORDS.contains(&norm) {
                return Some(tags(Function, norm, GU, NU, Unspecified, AnimU, PU));
            }
            if ADVERBS.contains(&norm) {
                return Some(tags(Adverb, norm, GU, NU, Unspecified, AnimU, PU));
            }
            return None;
        }
    };
    Some(a)
}

/// Possessive and relative pronoun forms decline like adjectives; their
/// gender/number/case follow from the ending, the normal form from the stem.
fn adjectival_pronoun(norm: &str) -> Option<MorphAnalysis> {
    let (family, person) = match norm {
        f if matches!(
            f,
            "мой" | "моего" | "моему" | "моим" | "моем" | "моя" | "мою" | "моей" | "мое" | "мои"
                | "моих" | "моими"
        ) =>
        {
            ("мой", Person::First)
        }
        f if matches!(
            f,
            "наш" | "нашего"
                | "нашему"
                | "нашим"
                | "нашем"
                | "наша"
                | "нашу"
                | "нашей"
                | "наше"
                | "наши"
                | "наших"
                | "нашими"
        ) =>
        {
            ("наш", Person::First)
        }
        f if matches!(
            f,
            "твой" | "твоего"
                | "твоему"
                | "твоим"
                | "твоем"
                | "твоя"
                | "твою"
                | "твоей"
                | "твое"
                | "твои"
                | "твоих"
                | "твоими"
        ) =>
        {
            ("твой", Person::Second)
        }
        f if matches!(
            f,
            "ваш" | "вашего"
                | "вашему"
                | "вашим"
                | "вашем"
                | "ваша"
                | "вашу"
                | "вашей"
                | "ваше"
                | "ваши"
                | "ваших"
                | "вашими"
        ) =>
        {
            ("ваш", Person::Second)
        }
        f if matches!(
            f,
            "свой" | "своего"
                | "своему"
                | "своим"
                | "своем"
                | "своя"
                | "свою"
                | "своей"
                | "свое"
                | "свои"
                | "своих"
                | "своими"
        ) =>
        {
            ("свой", Person::Unspecified)
        }
        f if f.starts_with("котор") => ("который", Person::Unspecified),
        f if matches!(
            f,
            "чей" | "чьего" | "чьему" | "чьим" | "чьем" | "чья" | "чьей" | "чью" | "чье" | "чьи"
                | "чьих" | "чьими"
        ) =>
        {
            ("чей", Person::Unspecified)
        }
        _ => return None,
    };
    let (gender, number, case) = adjectival_ending_tags(norm);
    Some(MorphAnalysis {
        pos: PosTag::Adjective,
        normal: family.to_string(),
        gender,
        number,
        case,
        animacy: Animacy::Unspecified,
        person,
    })
}

/// Gender/number/case of an adjectivally-declined form, from its ending.
fn adjectival_ending_tags(norm: &str) -> (Gender, Number, Case) {
    use Case::*;
    use Gender::*;
    use Number::*;
    for (suffix, tags) in [
        ("ыми", (Gender::Unspecified, Plural, Instrumental)),
        ("ими", (Gender::Unspecified, Plural, Instrumental)),
        ("ого", (Masc, Singular, Genitive)),
        ("его", (Masc, Singular, Genitive)),
        ("ому", (Masc, Singular, Dative)),
        ("ему", (Masc, Singular, Dative)),
        ("ая", (Femn, Singular, Nominative)),
        ("яя", (Femn, Singular, Nominative)),
        ("ую", (Femn, Singular, Accusative)),
        ("юю", (Femn, Singular, Accusative)),
        ("ой", (Femn, Singular, Genitive)),
        ("ей", (Femn, Singular, Genitive)),
        ("ое", (Neut, Singular, Nominative)),
        ("ее", (Neut, Singular, Nominative)),
        ("ые", (Gender::Unspecified, Plural, Nominative)),
        ("ие", (Gender::Unspecified, Plural, Nominative)),
        ("ьи", (Gender::Unspecified, Plural, Nominative)),
        ("ои", (Gender::Unspecified, Plural, Nominative)),
        ("ши", (Gender::Unspecified, Plural, Nominative)),
        ("ых", (Gender::Unspecified, Plural, Genitive)),
        ("их", (Gender::Unspecified, Plural, Genitive)),
        ("ым", (Masc, Singular, Instrumental)),
        ("им", (Masc, Singular, Instrumental)),
        ("ом", (Masc, Singular, Prepositional)),
        ("ем", (Masc, Singular, Prepositional)),
        ("ья", (Femn, Singular, Nominative)),
        ("оя", (Femn, Singular, Nominative)),
        ("ша", (Femn, Singular, Nominative)),
        ("ью", (Femn, Singular, Accusative)),
        ("ою", (Femn, Singular, Accusative)),
        ("шу", (Femn, Singular, Accusative)),
        ("ье", (Neut, Singular, Nominative)),
        ("ше", (Neut, Singular, Nominative)),
    ] {
        if norm.ends_with(suffix) {
            return tags;
        }
    }
    // Bare masculine base (мой, наш, свой, который, чей).
    (Masc, Singular, Nominative)
}

const FUNCTION_WORDS: &[&str] = &[
    "в", "во", "на", "с", "со", "к", "ко", "по", "за", "из", "у", "о", "об", "обо", "от", "до",
    "под", "над", "при", "про", "без", "через", "для", "между", "перед", "и", "а", "но", "или",
    "либо", "да", "же", "ли", "бы", "не", "ни", "вот", "как", "когда", "если", "чтобы", "это",
    "этот", "эта", "эти", "этом", "этого", "тот", "та", "те", "том", "того", "весь", "вся", "все",
    "всех", "сам", "сама", "сами", "самый", "уже", "еще", "только", "тоже", "также",
];

const ADVERBS: &[&str] = &[
    "вчера", "сегодня", "завтра", "сейчас", "потом", "тогда", "всегда", "никогда", "быстро",
    "медленно", "хорошо", "плохо", "рано", "поздно", "домой", "очень", "тут", "там", "здесь",
    "снова", "опять", "вдруг", "молча", "тихо", "громко", "куда", "туда", "сюда", "где", "зачем",
    "почему", "отсюда", "оттуда",
];

/// Common animate nouns the suffix heuristics cannot identify.
const ANIMATE_NOUNS: &[&str] = &[
    "человек", "люди", "мама", "папа", "брат", "сестра", "друг", "подруга", "девочка", "мальчик",
    "девушка", "женщина", "мужчина", "ребенок", "дети", "учитель", "ученик", "врач", "доктор",
    "директор", "студент", "студентка", "сосед", "соседка", "кот", "кошка", "собака", "пес",
    "бабушка", "дедушка", "сын", "дочь", "жена", "муж", "гость", "начальник", "писатель",
    "художник", "инженер", "капитан", "солдат", "мастер", "повар", "продавец", "водитель",
    "герой", "автор", "актер", "хозяин", "хозяйка",
];

const ANIMATE_SUFFIXES: &[&str] = &[
    "тель", "ник", "ница", "ист", "истка", "щик", "щица", "чик", "арь", "ант", "ент", "атор",
    "ер", "ор",
];

fn is_past_tense(norm: &str) -> bool {
    for suffix in ["ла", "ло", "ли"] {
        if let Some(stem) = norm.strip_suffix(suffix) {
            if stem
                .chars()
                .last()
                .is_some_and(|c| matches!(c, 'а' | 'е' | 'и' | 'я' | 'у' | 'ы' | 'ш'))
            {
                return true;
            }
        }
    }
    if let Some(stem) = norm.strip_suffix('л') {
        if stem
            .chars()
            .last()
            .is_some_and(|c| matches!(c, 'а' | 'е' | 'и' | 'я' | 'у' | 'ы'))
        {
            return true;
        }
    }
    norm.ends_with("шел")
}

fn is_verb_like(norm: &str) -> bool {
    let n = norm.chars().count();
    if norm.ends_with("ть") || norm.ends_with("ться") || norm.ends_with("чь") || norm.ends_with("ти")
    {
        return true;
    }
    if is_past_tense(norm) {
        return true;
    }
    if norm.ends_with("лся")
        || norm.ends_with("лась")
        || norm.ends_with("лось")
        || norm.ends_with("лись")
        || norm.ends_with("ется")
        || norm.ends_with("ится")
        || norm.ends_with("утся")
        || norm.ends_with("ются")
        || norm.ends_with("атся")
        || norm.ends_with("ятся")
    {
        return true;
    }
    if n >= 4
        && (norm.ends_with("ает")
            || norm.ends_with("яет")
            || norm.ends_with("еет")
            || norm.ends_with("ует")
            || norm.ends_with("ишь")
            || norm.ends_with("ешь")
            || norm.ends_with("ут")
            || norm.ends_with("ют")
            || norm.ends_with("ат")
            || norm.ends_with("ят"))
    {
        return true;
    }
    false
}

fn is_adjective_like(norm: &str) -> bool {
    let n = norm.chars().count();
    n >= 5
        && (norm.ends_with("ый")
            || norm.ends_with("ий")
            || norm.ends_with("ая")
            || norm.ends_with("яя")
            || norm.ends_with("ое")
            || norm.ends_with("ее")
            || norm.ends_with("ые")
            || norm.ends_with("ие")
            || norm.ends_with("ого")
            || norm.ends_with("его")
            || norm.ends_with("ому")
            || norm.ends_with("ему")
            || norm.ends_with("ую")
            || norm.ends_with("юю")
            || norm.ends_with("ыми")
            || norm.ends_with("ими"))
}

/// Noun gender/number/case from the declension ending.
fn noun_ending_tags(norm: &str) -> (Gender, Number, Case) {
    use Case::*;
    use Gender::*;
    use Number::*;
    for (suffix, tags) in [
        ("ами", (Gender::Unspecified, Plural, Instrumental)),
        ("ями", (Gender::Unspecified, Plural, Instrumental)),
        ("ах", (Gender::Unspecified, Plural, Prepositional)),
        ("ях", (Gender::Unspecified, Plural, Prepositional)),
        ("ам", (Gender::Unspecified, Plural, Dative)),
        ("ям", (Gender::Unspecified, Plural, Dative)),
        ("ов", (Masc, Plural, Genitive)),
        ("ев", (Masc, Plural, Genitive)),
        ("ой", (Femn, Singular, Instrumental)),
        ("ей", (Femn, Singular, Instrumental)),
        ("ою", (Femn, Singular, Instrumental)),
        ("ом", (Masc, Singular, Instrumental)),
        ("ем", (Masc, Singular, Instrumental)),
        ("у", (Femn, Singular, Accusative)),
        ("ю", (Femn, Singular, Accusative)),
        ("а", (Femn, Singular, Nominative)),
        ("я", (Femn, Singular, Nominative)),
        ("о", (Neut, Singular, Nominative)),
        ("е", (Neut, Singular, Nominative)),
        ("ы", (Gender::Unspecified, Plural, Nominative)),
        ("и", (Gender::Unspecified, Plural, Nominative)),
        ("ь", (Femn, Singular, Nominative)),
    ] {
        if norm.ends_with(suffix) {
            return tags;
        }
    }
    // Consonant ending: masculine nominative.
    (Masc, Singular, Nominative)
}

/// Crude lemma for open-class nouns: strip oblique plural/instrumental
/// endings, otherwise keep the form. Only coordination-group surfaces
/// depend on this, and those are overwhelmingly nominative names.
fn noun_normal(norm: &str) -> String {
    for suffix in ["ами", "ями", "ах", "ях"] {
        if let Some(stem) = norm.strip_suffix(suffix) {
            if stem.chars().count() >= 3 {
                return stem.to_string();
            }
        }
    }
    norm.to_string()
}

fn open_class(norm: &str, capitalized: bool) -> MorphAnalysis {
    if is_verb_like(norm) {
        return MorphAnalysis {
            pos: PosTag::Verb,
            normal: norm.to_string(),
            gender: Gender::Unspecified,
            number: Number::Unspecified,
            case: Case::Unspecified,
            animacy: Animacy::Unspecified,
            person: Person::Unspecified,
        };
    }
    if is_adjective_like(norm) {
        let (gender, number, case) = adjectival_ending_tags(norm);
        return MorphAnalysis {
            pos: PosTag::Adjective,
            normal: norm.to_string(),
            gender,
            number,
            case,
            animacy: Animacy::Unspecified,
            person: Person::Unspecified,
        };
    }
    let (gender, number, case) = noun_ending_tags(norm);
    let animacy = if capitalized
        || ANIMATE_NOUNS.contains(&norm)
        || ANIMATE_SUFFIXES.iter().any(|s| norm.ends_with(s))
    {
        Animacy::Animate
    } else {
        Animacy::Inanimate
    };
    // Names keep the gender their ending suggests, but a consonant-final
    // capitalized word is reliably a masculine name or noun.
    MorphAnalysis {
        pos: PosTag::Noun,
        normal: noun_normal(norm),
        gender,
        number,
        case,
        animacy,
        person: Person::Unspecified,
    }
}
