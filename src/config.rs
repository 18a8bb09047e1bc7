/// Six-component stroke style: base RGB plus one opacity per stroke pass.
///
/// Parsed from a `"R,G,B,A1,A2,A3"` string. Components that are missing or
/// fail to parse become NaN and render as black, never as a panic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleSpec {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: [f64; 3],
}

impl StyleSpec {
    pub fn parse(spec: &str) -> Self {
        let mut parts = spec
            .split(',')
            .map(|s| s.trim().parse::<f64>().unwrap_or(f64::NAN));
        let mut next = || parts.next().unwrap_or(f64::NAN);
        Self {
            red: next(),
            green: next(),
            blue: next(),
            alpha: [next(), next(), next()],
        }
    }

    pub fn components(&self) -> [f64; 6] {
        [
            self.red,
            self.green,
            self.blue,
            self.alpha[0],
            self.alpha[1],
            self.alpha[2],
        ]
    }

    /// False when any component failed to parse.
    pub fn is_valid(&self) -> bool {
        self.components().iter().all(|c| c.is_finite())
    }
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            red: 192.0,
            green: 92.0,
            blue: 32.0,
            alpha: [0.8, 0.5, 0.5],
        }
    }
}

/// Configuration for the knot animation
#[derive(Clone)]
pub struct KnotConfig {
    pub strands: usize,
    pub style: StyleSpec,
    pub time_step: f32,
    pub print: bool,
}
