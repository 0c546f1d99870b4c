use activity_pattern::Intensity;
use clap::ValueEnum;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum IntensityFlag {
    Low,
    Medium,
    High,
    Max,
    Ultra,
    Extreme,
}

impl IntensityFlag {
    pub(crate) const fn as_domain(self) -> Intensity {
        match self {
            IntensityFlag::Low => Intensity::Low,
            IntensityFlag::Medium => Intensity::Medium,
            IntensityFlag::High => Intensity::High,
            IntensityFlag::Max => Intensity::Max,
            IntensityFlag::Ultra => Intensity::Ultra,
            IntensityFlag::Extreme => Intensity::Extreme,
        }
    }
}
