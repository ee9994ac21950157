//! Advice generation on top of a [`TextGenerator`].
//!
//! Failures never reach the caller: [`Advisor::advise`] returns [`Advice`]
//! directly and degrades to [`Advice::Fallback`].

use crate::{model::Advice, provider::TextGenerator};

/// Prompt asking for a short, specific tip for the given weather description.
pub fn advice_prompt(description: &str) -> String {
    format!(
        "Dame un consejo breve para una persona que está en un clima con esta descripción: \
         \"{description}\". El consejo debe ser útil y específico. No más de 10 palabras"
    )
}

#[derive(Debug)]
pub struct Advisor {
    generator: Box<dyn TextGenerator>,
}

impl Advisor {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn advise(&self, description: &str) -> Advice {
        let prompt = advice_prompt(description);

        match self.generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => Advice::Generated(text.trim().to_string()),
            Ok(_) => {
                tracing::warn!(
                    %description,
                    "advice provider returned empty text; using fallback"
                );
                Advice::Fallback
            }
            Err(err) => {
                tracing::warn!(
                    %description,
                    error = %format!("{err:#}"),
                    "advice generation failed; using fallback"
                );
                Advice::Fallback
            }
        }
    }
}
