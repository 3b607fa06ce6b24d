//! The three preset schemas and the kind tag that selects between them.

use crate::field::{FieldRule, FieldSpec};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Plot types an axis preset can have.
pub const AXIS_TYPES: &[&str] = &["line", "scatter", "Ramachandran", "gradient"];

/// The phase-plot type, which iterates over an external frame range.
pub const PHASE_PLOT: &str = "Ramachandran";

const XY_PLOTS: &[&str] = &["line", "scatter", "Ramachandran"];
const LINE: &[&str] = &["line"];
const POINT_PLOTS: &[&str] = &["scatter", "Ramachandran", "gradient"];
const PHASE: &[&str] = &[PHASE_PLOT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    Figure,
    Subplot,
    Axis,
}

impl PresetKind {
    pub const ALL: [PresetKind; 3] = [PresetKind::Figure, PresetKind::Subplot, PresetKind::Axis];

    pub fn schema(self) -> &'static PresetSchema {
        match self {
            PresetKind::Figure => &FIGURE_SCHEMA,
            PresetKind::Subplot => &SUBPLOT_SCHEMA,
            PresetKind::Axis => &AXIS_SCHEMA,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PresetKind::Figure => "figure",
            PresetKind::Subplot => "subplot",
            PresetKind::Axis => "axis",
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered field descriptors for one preset kind.
///
/// Order is prompt order: `type` precedes every type-gated field.
#[derive(Debug)]
pub struct PresetSchema {
    pub kind: PresetKind,
    fields: Vec<FieldSpec>,
}

impl PresetSchema {
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether presets of this schema carry a plot-type tag.
    pub fn has_variants(&self) -> bool {
        self.field("type").is_some()
    }
}

fn name_field(prompt: &'static str) -> FieldSpec {
    FieldSpec::new("name", FieldRule::FreeText, Value::text(""))
        .prompts(
            prompt,
            "name [New Name]",
            "Name: ",
            "The name of your preset. Only used to help identify and distinguish from other presets.",
        )
        .mandatory()
}

fn comment_field() -> FieldSpec {
    FieldSpec::new("comment", FieldRule::FreeText, Value::text("")).prompts(
        "Optionally leave a helpful comment to yourself about the purpose of this preset. ",
        "comment [Comment]",
        "Comment: ",
        "Just something to help you remember what this is used for when you come back to it later. \
         Has no effect on the behavior of the preset.",
    )
}

fn grid_fields(unit: &'static str) -> [FieldSpec; 2] {
    let (rows_prompt, cols_prompt) = match unit {
        "sub-figures" => (
            "How many rows of sub-figures are there? ",
            "How many columns of sub-figures are there? ",
        ),
        _ => (
            "How many rows of sub-plots are there? ",
            "How many columns of sub-plots are there? ",
        ),
    };
    [
        FieldSpec::new("rows", FieldRule::Count, Value::Int(1)).prompts(
            rows_prompt,
            "rows [Number of Rows]",
            "Rows: ",
            "How many rows of the grid should be laid out?",
        ),
        FieldSpec::new("cols", FieldRule::Count, Value::Int(1)).prompts(
            cols_prompt,
            "cols [Number of Columns]",
            "Columns: ",
            "How many columns of the grid should be laid out?",
        ),
    ]
}

fn ratio_fields() -> [FieldSpec; 2] {
    [
        FieldSpec::new("widthRatios", FieldRule::Ratios, Value::Null).prompts(
            "Please enter the ratios of widths of plots, separated by a space. ",
            "widthRatios [Ratio List Separated by a Space]",
            "Width Ratios: ",
            "What should the ratio of widths be, for each plot in each row? \
             The length of the list should be equal to the number of columns.",
        ),
        FieldSpec::new("heightRatios", FieldRule::Ratios, Value::Null).prompts(
            "Please enter the ratios of height of plots, separated by a space. ",
            "heightRatios [Ratio List Separated by a Space]",
            "Height Ratios: ",
            "What should the ratio of height be, for each plot in each column? \
             The length of the list should be equal to the number of rows.",
        ),
    ]
}

static FIGURE_SCHEMA: LazyLock<PresetSchema> = LazyLock::new(|| {
    let [rows, cols] = grid_fields("sub-figures");
    let [width_ratios, height_ratios] = ratio_fields();
    PresetSchema {
        kind: PresetKind::Figure,
        fields: vec![
            name_field("What should the name of this figure preset be? "),
            comment_field(),
            rows,
            cols,
            FieldSpec::new("numSubFigures", FieldRule::OptionalCount, Value::Null).prompts(
                "How many sub-figures do you want? ",
                "numSubFigures [Number of SubFigures]",
                "Number of SubFigures: ",
                "How many sub-figures should be drawn? For example, two rows and columns of \
                 sub-figures but only three sub-figures leaves the bottom right empty. \
                 Leave blank to fill the grid.",
            ),
            width_ratios,
            height_ratios,
            FieldSpec::new("width", FieldRule::Count, Value::Int(1))
                .prompts(
                    "What should the width of the plot be? ",
                    "width [Width]",
                    "Width: ",
                    "What should the width of the figure be, in pixels?",
                )
                .mandatory(),
            FieldSpec::new("height", FieldRule::Count, Value::Int(1))
                .prompts(
                    "What should the height of the plot be? ",
                    "height [Height]",
                    "Height: ",
                    "What should the height of the figure be, in pixels?",
                )
                .mandatory(),
        ],
    }
});

static SUBPLOT_SCHEMA: LazyLock<PresetSchema> = LazyLock::new(|| {
    let [rows, cols] = grid_fields("sub-plots");
    let [width_ratios, height_ratios] = ratio_fields();
    PresetSchema {
        kind: PresetKind::Subplot,
        fields: vec![
            name_field("What should the name of this subplot preset be? "),
            comment_field(),
            rows,
            cols,
            FieldSpec::new("numSubPlots", FieldRule::OptionalCount, Value::Null).prompts(
                "How many subplots do you want? ",
                "numSubPlots [Number of Sub-Plots]",
                "Number of SubPlots: ",
                "How many sub-plots should be drawn? For example, two rows and columns of \
                 sub-plots but only three sub-plots leaves the bottom right empty. \
                 Leave blank to fill the grid.",
            ),
            width_ratios,
            height_ratios,
            FieldSpec::new("shareX", FieldRule::YesNo, Value::Bool(false)).prompts(
                "Would you like each subplot to share the X-Axis? (Y/N) ",
                "shareX [Y | N]",
                "ShareX: ",
                "If bounds are not placed on the X-Axis, every sub-plot gets the same start and end values.",
            ),
            FieldSpec::new("shareY", FieldRule::YesNo, Value::Bool(false)).prompts(
                "Would you like each subplot to share the Y-Axis? (Y/N) ",
                "shareY [Y | N]",
                "ShareY: ",
                "If bounds are not placed on the Y-Axis, every sub-plot gets the same start and end values.",
            ),
        ],
    }
});

fn bounds_field(name: &'static str, modify: &'static str, display: &'static str, help: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldRule::IntTuple(2), Value::Null)
        .prompts(
            "Please enter the lower and upper bounds, separated by only a space. ",
            modify,
            display,
            help,
        )
        .advanced()
}

fn ticks_field(name: &'static str, modify: &'static str, display: &'static str, help: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldRule::IntTuple(3), Value::Null)
        .prompts(
            "Please enter the lower bound, upper bound, and frequency of ticks, each separated by one space. ",
            modify,
            display,
            help,
        )
        .advanced()
}

static AXIS_SCHEMA: LazyLock<PresetSchema> = LazyLock::new(|| PresetSchema {
    kind: PresetKind::Axis,
    fields: vec![
        name_field("What should the name of your preset be? "),
        comment_field(),
        FieldSpec::new("type", FieldRule::Choice(AXIS_TYPES), Value::text(""))
            .prompts(
                "What type plot are you trying to make? line, scatter, Ramachandran, or gradient ",
                "type [line|scatter|Ramachandran|gradient]",
                "Type: ",
                "The type of plot you want to make with your data. \
                 The options are line, scatter, Ramachandran, and gradient.",
            )
            .mandatory(),
        FieldSpec::new("numPlots", FieldRule::Count, Value::Int(0))
            .prompts(
                "How many datasets are you looking to plot? ",
                "numPlots [Number of Datasets]",
                "Number of Plots: ",
                "The number of sets of data you want to graph; the number of files you want to graph.",
            )
            .mandatory(),
        FieldSpec::new("xAxisTitle", FieldRule::FreeText, Value::text("")).prompts(
            "What should the title of the X-Axis be? ",
            "xAxisTitle [Title]",
            "Title of X-Axis: ",
            "The title of the X-Axis",
        ),
        FieldSpec::new("yAxisTitle", FieldRule::FreeText, Value::text(""))
            .prompts(
                "What should the title of the Y-Axis be? ",
                "yAxisTitle [Title]",
                "Title of Y-Axis: ",
                "The title of the Y-Axis",
            )
            .only_for(XY_PLOTS),
        FieldSpec::new("movAvg", FieldRule::YesNo, Value::Bool(false))
            .prompts(
                "Would you like a moving average? (Y/N) ",
                "movAvg [Y | N]",
                "Moving Average? ",
                "A boolean determining if you want a moving average, useful for \"smoothing out\" noisy data.",
            )
            .mandatory()
            .only_for(LINE),
        FieldSpec::new("movAvgFr", FieldRule::Count, Value::Int(0))
            .prompts(
                "How many frames would you like your moving average to be? ",
                "movAvgFr [Number of Frames]",
                "Moving Average Frames: ",
                "The number of frames by which to calculate the moving average. \
                 If movAvg = N, then this is ignored.",
            )
            .mandatory()
            .only_for(LINE),
        FieldSpec::new("palette", FieldRule::HexPalette, Value::TextList(Vec::new()))
            .prompts(
                "Please enter the palette you would like to use, hex values separated only by a space. ",
                "palette [Hex Values separated by only a space]",
                "Palette: ",
                "Hex values determining the color of each dataset. If you are using a moving average, \
                 you should input 2*numPlots, in the order: [plot1] [mov avg plot1], etc",
            )
            .advanced()
            .only_for(LINE),
        FieldSpec::new("color", FieldRule::Words, Value::TextList(Vec::new()))
            .prompts(
                "What colors/gradients are you using to color your points? \
                 You can add '_r' to reverse the order of the gradient. Separate each with a space. ",
                "color [Gradient Names separated by a space]",
                "Color: ",
                "The colour gradient used for each dataset's points, in dataset order.",
            )
            .advanced()
            .only_for(POINT_PLOTS),
        bounds_field(
            "xLimit",
            "xLimit [[Lower Bound] [Upper Bound]]",
            "X Bounds: ",
            "Determines the X-Axis view limits. If left > right, then the X-Axis values will decrease from left to right.",
        ),
        ticks_field(
            "xTicks",
            "xTicks [[Lower Bound] [Upper Bound] [Frequency]]",
            "X Ticks: ",
            "Determines where the ticks on the X-Axis begin and end, and how frequent they are.",
        ),
        ticks_field(
            "xTicksMinor",
            "xTicksMinor [[Lower Bound] [Upper Bound] [Frequency]]",
            "X Ticks (Minor): ",
            "Allows for minor ticks to be added to the plot for ease of readings.",
        ),
        FieldSpec::new("xScale", FieldRule::OptionalScale, Value::Int(1))
            .prompts(
                "What should the scale of the X-Axis be? ",
                "xScale [Scale]",
                "X Scale: ",
                "One unit on the X-Axis should be equal to how many units in the data? Must not be zero.",
            )
            .advanced(),
        FieldSpec::new("xOffset", FieldRule::OptionalSignedInt, Value::Int(0))
            .prompts(
                "Should the x-values be offset by any amount? ",
                "xOffset [Offset Value]",
                "X Offset: ",
                "Shifts the values of the x-axis to the left or right by a specified amount",
            )
            .advanced(),
        bounds_field(
            "yLimit",
            "yLimit [[Lower Bound] [Upper Bound]]",
            "Y Bounds: ",
            "Determines the Y-Axis view limits. If lower > upper, then the Y-Axis values will decrease from bottom to top.",
        )
        .only_for(XY_PLOTS),
        ticks_field(
            "yTicks",
            "yTicks [[Lower Bound] [Upper Bound] [Frequency]]",
            "Y Ticks: ",
            "Determines where the ticks on the Y-Axis begin and end, and how frequent they are.",
        )
        .only_for(XY_PLOTS),
        ticks_field(
            "yTicksMinor",
            "yTicksMinor [[Lower Bound] [Upper Bound] [Frequency]]",
            "Y Ticks (Minor): ",
            "Allows for minor ticks to be added to the plot for ease of readings.",
        ),
        FieldSpec::new("yScale", FieldRule::OptionalScale, Value::Int(1))
            .prompts(
                "What should the scale of the Y-Axis be? ",
                "yScale [Scale]",
                "Y Scale: ",
                "One unit on the Y-Axis should be equal to how many units in the data? Must not be zero.",
            )
            .advanced()
            .only_for(XY_PLOTS),
        FieldSpec::new("yOffset", FieldRule::OptionalSignedInt, Value::Int(0))
            .prompts(
                "Should the y-values be offset by any amount? ",
                "yOffset [Offset Value]",
                "Y Offset: ",
                "Shifts the values of the y-axis up or down by a specified amount",
            )
            .advanced()
            .only_for(XY_PLOTS),
        FieldSpec::new("applyTransformToComponents", FieldRule::YesNo, Value::Bool(true))
            .prompts(
                "Should Y scale and offset apply to every component of multi-column rows? (Y/N) ",
                "applyTransformToComponents [Y | N]",
                "Transform Components? ",
                "Rows with several value columns (scatter and Ramachandran data) can either be scaled \
                 and offset component by component (Y, the default) or passed through untouched (N). \
                 Older versions of this tool were inconsistent here, so pick whichever your data expects.",
            )
            .advanced(),
        FieldSpec::new("startNs", FieldRule::SignedInt, Value::Int(0))
            .prompts(
                "When calculating a series of successive nanoseconds, what number do you want to start at? ",
                "startNs [Nanosecond Number]",
                "StartNS: ",
                "This option allows you to plot the Ramachandran plot of multiple nanoseconds at once. \
                 What number do you want to start at?",
            )
            .only_for(PHASE),
        FieldSpec::new("endNs", FieldRule::SignedInt, Value::Int(0))
            .prompts(
                "When calculating a series of successive nanoseconds, what number do you want to end at (Exclusive)? ",
                "endNs [Nanosecond Number]",
                "EndNS: ",
                "This option allows you to plot the Ramachandran plot of multiple nanoseconds at once. \
                 What number do you want to end at?",
            )
            .only_for(PHASE),
        FieldSpec::new("indexOffset", FieldRule::Count, Value::Int(0))
            .prompts(
                "Should there be any index offset? ",
                "indexOffset [Offset Value]",
                "Index Offset: ",
                "When generating one plot after another, you can keep track of the current index. \
                 Should this be offset by any amount?",
            )
            .advanced()
            .only_for(PHASE),
    ],
});
