//! The fixed price buckets behind the bar-chart histogram.

/// One histogram bucket: a half-open range `[lower, upper)` over sale price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    /// The label consumers key on, e.g. `"201-300"`.
    pub label: &'static str,
    /// The lowest price inside the bucket.
    pub lower: f64,
    /// The price at which the next bucket starts, or `None` for the last,
    /// open-ended bucket.
    pub upper: Option<f64>,
}

/// The ten price buckets of the histogram, ascending by lower bound.
///
/// A price exactly on a boundary belongs to the bucket starting at that
/// boundary, so a 300.00 sale counts towards `"301-400"`.
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket {
        label: "0-100",
        lower: 0.0,
        upper: Some(100.0),
    },
    PriceBucket {
        label: "101-200",
        lower: 100.0,
        upper: Some(200.0),
    },
    PriceBucket {
        label: "201-300",
        lower: 200.0,
        upper: Some(300.0),
    },
    PriceBucket {
        label: "301-400",
        lower: 300.0,
        upper: Some(400.0),
    },
    PriceBucket {
        label: "401-500",
        lower: 400.0,
        upper: Some(500.0),
    },
    PriceBucket {
        label: "501-600",
        lower: 500.0,
        upper: Some(600.0),
    },
    PriceBucket {
        label: "601-700",
        lower: 600.0,
        upper: Some(700.0),
    },
    PriceBucket {
        label: "701-800",
        lower: 700.0,
        upper: Some(800.0),
    },
    PriceBucket {
        label: "801-900",
        lower: 800.0,
        upper: Some(900.0),
    },
    PriceBucket {
        label: "901-above",
        lower: 900.0,
        upper: None,
    },
];
