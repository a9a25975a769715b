//! Pool selection and shared tone blocks

use rand::seq::SliceRandom;

/// Pick one phrasing from a pool of equivalent-meaning alternatives
///
/// The only nondeterminism in directive generation; every phrase in a pool
/// carries the same meaning, so callers stay deterministic in everything
/// but wording.
pub fn pick(pool: &[&'static str]) -> &'static str {
    pool.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Estoy aquí contigo.")
}

/// Tone instructions for therapeutic listening turns
pub const THERAPY_TONE: &str = "Escucha con calidez y sin juzgar. Valida lo que la persona \
     siente antes de decir nada más. No des consejos ni intentes resolver; acompaña. \
     Frases cortas, tono suave.";

/// Tone instructions for crisis turns
pub const CRISIS_TONE: &str = "Prioriza la seguridad de la persona. Frases cortas y claras, \
     sin dramatismo y sin resolver problemas. Recuérdale que no está sola y que hay ayuda \
     profesional disponible. No cambies de tema.";

/// Tone instructions for simulated-parental turns
pub const PARENTAL_TONE: &str = "Habla con el cariño cotidiano de una madre o un padre: \
     cercano, protector, algo casero. Puedes usar diminutivos. Interésate por lo concreto \
     del día a día.";

/// Tone instructions for supervision check-ins
pub const SUPERVISION_TONE: &str = "Habla con sencillez y paciencia, adaptado a la persona \
     cuidada. Pregunta cómo se encuentra y si necesita algo. Nunca la alarmes.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_returns_pool_member() {
        let pool = &["a", "b", "c"];
        for _ in 0..32 {
            assert!(pool.contains(&pick(pool)));
        }
    }

    #[test]
    fn test_pick_empty_pool_falls_back() {
        assert!(!pick(&[]).is_empty());
    }
}
