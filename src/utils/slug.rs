/// Geração de slugs para URLs do catálogo

use deunicode::deunicode;

/// Converte um nome livre em slug de URL: remove acentos, baixa para
/// minúsculas e troca qualquer sequência não alfanumérica por um hífen.
///
/// # Exemplo
/// ```
/// use baixatudo_backend::utils::slug::slugify;
///
/// assert_eq!(slugify("Editor de Código 2.0"), "editor-de-codigo-2-0");
/// ```
pub fn slugify(input: &str) -> String {
    deunicode(input)
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basico() {
        assert_eq!(slugify("Meu Programa"), "meu-programa");
    }

    #[test]
    fn test_slugify_acentos() {
        assert_eq!(slugify("Edição de Vídeo Avançada"), "edicao-de-video-avancada");
    }

    #[test]
    fn test_slugify_pontuacao_e_espacos() {
        assert_eq!(slugify("  Foto & Cia 3.1!  "), "foto-cia-3-1");
    }

    #[test]
    fn test_slugify_vazio() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
