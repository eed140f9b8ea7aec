//! Writes `zomato_sample.csv`: a deterministic, deliberately messy restaurant
//! dataset (unrated sentinels, `x/5` ratings, thousands separators, repeated
//! branches, blank cells, Latin-1 accents) for trying out the viewer.

use csv::ByteRecord;

const LOCATIONS: [&str; 8] = [
    "BTM",
    "Banashankari",
    "HSR",
    "Indiranagar",
    "Jayanagar",
    "JP Nagar",
    "Koramangala 5th Block",
    "Whitefield",
];

const NAMES: [&str; 24] = [
    "Jalsa",
    "Spice Elephant",
    "San Churro Cafe",
    "Addhuri Udupi Bhojana",
    "Grand Village",
    "Timepass Dinner",
    "Rosewood International Hotel",
    "Onesta",
    "Penthouse Cafe",
    "Smacznego",
    "Café Shuffle",
    "Café Noir",
    "Meghana Foods",
    "Empire Restaurant",
    "Truffles",
    "Corner House Ice Creams",
    "Chai Point",
    "Brahmin's Coffee Bar",
    "Vidyarthi Bhavan",
    "Toit",
    "Third Wave Coffee",
    "Leon Grill",
    "Burger King",
    "Biergarten",
];

const CUISINES: [&str; 12] = [
    "North Indian, Mughlai, Chinese",
    "Chinese, North Indian, Thai",
    "Cafe, Mexican, Italian",
    "South Indian, North Indian",
    "North Indian, Rajasthani",
    "North Indian",
    "Cafe",
    "Pizza, Cafe, Italian",
    "Biryani, North Indian",
    "Desserts, Ice Cream",
    "Fast Food, Burger",
    "Continental, European, Italian",
];

const REST_TYPES: [&str; 6] = [
    "Casual Dining",
    "Cafe, Casual Dining",
    "Quick Bites",
    "Dessert Parlor",
    "Microbrewery, Pub",
    "Delivery",
];

const COSTS: [u32; 14] = [150, 200, 250, 300, 350, 400, 450, 500, 600, 700, 800, 1000, 1200, 1500];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

/// Encode as Latin-1; characters above U+00FF become `?`.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn rating_cell(rng: &mut SimpleRng) -> String {
    match rng.below(20) {
        0 => "NEW".to_string(),
        1 => "-".to_string(),
        2 => String::new(),
        3 => "not rated".to_string(),
        4 => format!("{:.1} /5", 2.5 + rng.next_f64() * 2.4),
        _ => format!("{:.1}/5", 2.5 + rng.next_f64() * 2.4),
    }
}

fn cost_cell(rng: &mut SimpleRng) -> String {
    let cost = COSTS[rng.below(COSTS.len())];
    match rng.below(15) {
        0 => String::new(),
        _ if cost >= 1000 => format!("{},{:03}", cost / 1000, cost % 1000),
        _ => cost.to_string(),
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "zomato_sample.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record([
            "url",
            "name",
            "online_order",
            "book_table",
            "rate",
            "votes",
            "location",
            "rest_type",
            "cuisines",
            "approx_cost(for two people)",
            "listed_in(type)",
        ])
        .expect("Failed to write header");

    let mut rows = 0;
    for (i, name) in NAMES.iter().enumerate() {
        let branches = 1 + rng.below(3);
        for _ in 0..branches {
            let location = rng.pick(&LOCATIONS);
            // Listings repeat across categories, like the real export.
            let repeats = 1 + rng.below(2);
            let rate = rating_cell(&mut rng);
            let cost = cost_cell(&mut rng);
            let cuisines = if rng.below(25) == 0 { "" } else { CUISINES[i % CUISINES.len()] };
            let rest_type = rng.pick(&REST_TYPES);

            for listed_in in ["Delivery", "Dine-out"].iter().take(repeats) {
                let url = format!(
                    "https://example.com/bangalore/{}",
                    name.to_lowercase().replace(' ', "-")
                );
                let votes = rng.below(2000).to_string();
                let location = if rng.below(40) == 0 { "" } else { location };
                let fields = [
                    url.as_str(),
                    *name,
                    if rng.below(2) == 0 { "Yes" } else { "No" },
                    if rng.below(4) == 0 { "Yes" } else { "No" },
                    rate.as_str(),
                    votes.as_str(),
                    location,
                    rest_type,
                    cuisines,
                    cost.as_str(),
                    *listed_in,
                ];
                let record: ByteRecord = fields.iter().map(|f| latin1(f)).collect();
                writer.write_byte_record(&record).expect("Failed to write row");
                rows += 1;
            }
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} restaurant rows to {output_path}");
}
