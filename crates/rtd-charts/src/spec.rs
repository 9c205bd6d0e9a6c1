//! Library-neutral chart specification consumed by renderers.

use rtd_core::Real;
use serde::{Deserialize, Serialize};

use crate::chart::{Annotation, ChartResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub series: Vec<DataSeries>,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub title: String,
    pub range: [Real; 2],
    #[serde(default = "default_true")]
    pub show_tick_labels: bool,
}

/// One legend entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    pub label: String,
    pub x: Vec<Real>,
    pub y: Vec<Real>,
}

fn default_true() -> bool {
    true
}

impl ChartResult {
    /// Series order: the computed curve first, then the ideal reference.
    pub fn to_spec(&self) -> ChartSpec {
        let mut series = vec![DataSeries {
            label: self.primary_label.clone(),
            x: self.primary.time_s().to_vec(),
            y: self.primary.values().to_vec(),
        }];
        if let Some(reference) = &self.reference {
            series.push(DataSeries {
                label: "Ideal".to_string(),
                x: reference.time_s().to_vec(),
                y: reference.values().to_vec(),
            });
        }

        ChartSpec {
            title: self.title.clone(),
            x_axis: AxisSpec {
                title: self.x_title.clone(),
                range: [self.axes.time.0, self.axes.time.1],
                show_tick_labels: true,
            },
            y_axis: AxisSpec {
                title: self.y_title.clone(),
                range: [self.axes.value.0, self.axes.value.1],
                show_tick_labels: self.show_value_ticks,
            },
            series,
            annotation: self.annotation.clone(),
        }
    }
}
