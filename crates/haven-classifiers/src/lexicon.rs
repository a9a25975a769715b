//! Curated Spanish phrase sets for emotion and crisis detection
//!
//! All tables are matched against lowercased input. Emotion keywords are
//! counted as whole words; crisis phrases are matched by containment.

use haven_core::Emotion;

/// Fixed evaluation order over the emotion set
///
/// Ties in keyword counts keep the first emotion in this order.
pub const EMOTION_ORDER: [Emotion; 14] = [
    Emotion::Sadness,
    Emotion::Hopelessness,
    Emotion::Discouragement,
    Emotion::Loneliness,
    Emotion::Anxiety,
    Emotion::Fear,
    Emotion::Anger,
    Emotion::Frustration,
    Emotion::Shame,
    Emotion::Grief,
    Emotion::Exhaustion,
    Emotion::Joy,
    Emotion::Gratitude,
    Emotion::Calm,
];

/// Keyword list for one emotion
pub fn keywords(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Sadness => &[
            "triste",
            "tristeza",
            "llorar",
            "llorando",
            "deprimido",
            "deprimida",
            "pena",
            "decaído",
            "decaída",
        ],
        Emotion::Hopelessness => &[
            "desesperanza",
            "desesperanzado",
            "desesperanzada",
            "sin esperanza",
            "sin salida",
            "hundido",
            "hundida",
            "vacío",
            "vacía",
        ],
        Emotion::Discouragement => &[
            "desanimado",
            "desanimada",
            "desmotivado",
            "desmotivada",
            "sin ganas",
            "sin ánimo",
            "apatía",
            "desgana",
        ],
        Emotion::Loneliness => &[
            "solo",
            "sola",
            "soledad",
            "abandonado",
            "abandonada",
            "aislado",
            "aislada",
        ],
        Emotion::Anxiety => &[
            "ansiedad",
            "ansioso",
            "ansiosa",
            "nervioso",
            "nerviosa",
            "agobiado",
            "agobiada",
            "inquieto",
            "inquieta",
        ],
        Emotion::Fear => &["miedo", "asustado", "asustada", "terror", "pánico", "temor"],
        Emotion::Anger => &[
            "enojado",
            "enojada",
            "enfadado",
            "enfadada",
            "rabia",
            "furioso",
            "furiosa",
            "ira",
        ],
        Emotion::Frustration => &[
            "frustrado",
            "frustrada",
            "frustración",
            "harto",
            "harta",
            "impotencia",
        ],
        Emotion::Shame => &[
            "vergüenza",
            "avergonzado",
            "avergonzada",
            "culpa",
            "culpable",
            "humillado",
            "humillada",
        ],
        Emotion::Grief => &["duelo", "luto", "pérdida", "falleció", "murió"],
        Emotion::Exhaustion => &[
            "agotado",
            "agotada",
            "cansado",
            "cansada",
            "exhausto",
            "exhausta",
            "sin fuerzas",
        ],
        Emotion::Joy => &[
            "feliz",
            "contento",
            "contenta",
            "alegre",
            "alegría",
            "genial",
            "ilusionado",
            "ilusionada",
        ],
        Emotion::Gratitude => &["gracias", "agradecido", "agradecida", "agradezco"],
        Emotion::Calm => &[
            "tranquilo",
            "tranquila",
            "calma",
            "en paz",
            "relajado",
            "relajada",
            "sereno",
            "serena",
        ],
        Emotion::Neutral | Emotion::Other => &[],
    }
}

/// Explicit suicidal-ideation phrases; any match is a high-urgency verdict
pub const SUICIDAL_IDEATION: &[&str] = &[
    "quiero morir",
    "quiero morirme",
    "me quiero morir",
    "no quiero vivir",
    "no quiero seguir viviendo",
    "quiero desaparecer",
    "quitarme la vida",
    "me quiero matar",
    "quiero matarme",
    "acabar con todo",
    "ya no quiero estar aquí",
    "mejor estaría muerto",
    "mejor estaría muerta",
    "no vale la pena vivir",
];

/// Self-harm phrases; any match is a high-urgency verdict
pub const SELF_HARM: &[&str] = &[
    "hacerme daño",
    "me quiero hacer daño",
    "me hago daño",
    "cortarme",
    "me corto",
    "lastimarme",
    "me quiero lastimar",
    "me estoy lastimando",
    "golpearme",
];

/// Severe-collapse phrases; promoted to a verdict only under the rules in
/// [`crate::crisis::CrisisClassifier`]
pub const SEVERE_COLLAPSE: &[&str] = &[
    "no puedo más",
    "ya no puedo más",
    "no aguanto más",
    "todo está mal",
    "todo me sale mal",
    "nada tiene sentido",
    "nada importa",
    "estoy destrozado",
    "estoy destrozada",
    "no le importo a nadie",
    "nadie me quiere",
    "no puedo salir de esto",
    "ayúdame por favor",
    "ayúdenme por favor",
    "necesito ayuda urgente",
];

/// Collapse phrases that are urgent regardless of the current emotion
pub const UNCONDITIONALLY_URGENT: &[&str] = &[
    "ayúdame por favor",
    "ayúdenme por favor",
    "necesito ayuda urgente",
];

/// Emotions that promote a collapse phrase to a verdict on their own
pub const COLLAPSE_PROMOTING: [Emotion; 3] =
    [Emotion::Hopelessness, Emotion::Sadness, Emotion::Grief];

/// Emotions that count toward the sustained-negativity pattern
pub const SUSTAINED_NEGATIVE: [Emotion; 3] = [
    Emotion::Sadness,
    Emotion::Hopelessness,
    Emotion::Discouragement,
];

/// Prior turns inspected by the sustained-negativity rule
pub const HISTORY_WINDOW: usize = 4;

/// Negative turns required within the window for the pattern to fire
pub const HISTORY_NEGATIVE_THRESHOLD: usize = 3;
