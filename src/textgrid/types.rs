/// TextGrid全体
#[derive(Debug, Clone, PartialEq)]
pub struct TextGrid {
    pub xmin: f64,
    pub xmax: f64,
    /// ファイル内の宣言順
    pub tiers: Vec<Tier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub name: String,
    pub xmin: f64,
    pub xmax: f64,
    pub items: TierItems,
}

/// ティアの中身（区間ティアか点ティアか）
#[derive(Debug, Clone, PartialEq)]
pub enum TierItems {
    Intervals(Vec<Interval>),
    Points(Vec<Point>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub xmin: f64,
    pub xmax: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub time: f64,
    pub mark: String,
}

impl Tier {
    pub fn intervals(&self) -> Option<&[Interval]> {
        match &self.items {
            TierItems::Intervals(intervals) => Some(intervals),
            TierItems::Points(_) => None,
        }
    }

    /// Praat上のクラス名
    pub fn class_name(&self) -> &'static str {
        match self.items {
            TierItems::Intervals(_) => "IntervalTier",
            TierItems::Points(_) => "TextTier",
        }
    }

    pub fn len(&self) -> usize {
        match &self.items {
            TierItems::Intervals(intervals) => intervals.len(),
            TierItems::Points(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
