//! Hash helpers – abstracción para poder cambiar de algoritmo sin tocar el
//! resto del core. El hash de definición (lista ordenada de nombres de
//! steps) es metadato para colaboradores que persisten corridas.

use blake3::Hasher;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Hash de definición: lista ordenada de nombres de steps.
pub fn hash_step_names<S: AsRef<str>>(names: &[S]) -> String {
    let ids: Vec<&str> = names.iter().map(|s| s.as_ref()).collect();
    let ids_json = serde_json::json!(ids);
    hash_str(&ids_json.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_order_sensitive() {
        let a = hash_step_names(&["prepare", "ferment"]);
        let b = hash_step_names(&["prepare", "ferment"]);
        let c = hash_step_names(&["ferment", "prepare"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
