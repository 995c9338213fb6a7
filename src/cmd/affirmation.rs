use crate::data::affirmation::AffirmationDeck;
use anyhow::Result;
use rand::Rng;
use std::io::Write;

pub fn run<R: Rng + ?Sized, W: Write>(rng: &mut R, out: &mut W) -> Result<()> {
    let text = AffirmationDeck::default().draw(rng);
    writeln!(out, "✨ {}", text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::affirmation::AFFIRMATIONS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_prints_one_affirmation() {
        let mut buf = Vec::new();
        run(&mut StdRng::seed_from_u64(3), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let text = out.trim_start_matches("✨ ").trim_end();
        assert!(AFFIRMATIONS.contains(&text));
    }
}
