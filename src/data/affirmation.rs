use rand::seq::SliceRandom;
use rand::Rng;

pub const AFFIRMATIONS: [&str; 30] = [
    "You are capable of amazing things.",
    "Today is full of possibilities and blessings.",
    "Your potential is limitless.",
    "You are worthy of love and respect.",
    "Every challenge is an opportunity to grow.",
    "You are stronger than you think.",
    "Your dreams are within reach.",
    "You bring light to this world.",
    "You are deserving of success and happiness.",
    "Your voice matters and your presence is valued.",
    "You are a beacon of positivity.",
    "Every day brings new hope and opportunities.",
    "You are capable of achieving great things.",
    "Your spirit is unbreakable.",
    "You are blessed with endless potential.",
    "Peace and joy flow through you.",
    "You are a warrior of light.",
    "Your future is bright and beautiful.",
    "You deserve all the good things coming your way.",
    "You are loved, valued, and appreciated.",
    "Trust in your journey and believe in yourself.",
    "You are a source of inspiration to others.",
    "Your kindness creates positive ripples in the world.",
    "You are exactly where you need to be.",
    "Your faith will guide you through anything.",
    "You are a masterpiece of creation.",
    "Every breath you take is a blessing.",
    "You have the power to transform your life.",
    "Your heart is pure and your intentions are true.",
    "You are protected and guided by the universe.",
];

/// Random draws that do not repeat until every affirmation has been shown.
#[derive(Debug, Default)]
pub struct AffirmationDeck {
    used: Vec<usize>,
}

impl AffirmationDeck {
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'static str {
        if self.used.len() == AFFIRMATIONS.len() {
            self.used.clear();
        }
        let available: Vec<usize> = (0..AFFIRMATIONS.len())
            .filter(|i| !self.used.contains(i))
            .collect();
        let index = available.choose(rng).copied().unwrap_or(0);
        self.used.push(index);
        AFFIRMATIONS[index]
    }
}
