use std::path::Path;

use anyhow::Result;
use ndarray::Array4;
use tract_onnx::prelude::*;

type NnModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// A pre-trained classifier mapping one NHWC batch to a vector of class scores.
///
/// Implementations are shared read-only between requests, so `predict` takes `&self` and must be
/// safe to call from several threads at once.
pub trait Classifier: Send + Sync {
    /// Number of scores per prediction, if the model declares a static output shape.
    fn output_len(&self) -> Option<usize>;

    fn predict(&self, batch: Array4<f32>) -> Result<Vec<f32>>;
}

/// Classifier backed by an ONNX graph executed with tract.
pub struct OnnxClassifier {
    model: NnModel,
    output_len: Option<usize>,
}

impl OnnxClassifier {
    /// Load and optimize an ONNX model taking a `1 x height x width x 3` input.
    pub fn load(path: impl AsRef<Path>, width: u32, height: u32) -> Result<Self> {
        let input_fact = InferenceFact::dt_shape(f32::datum_type(), input_shape(width, height));
        let model = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(0, input_fact)?
            .into_typed()?;

        Self::from_model(model)
    }

    /// Optimize an already typed graph and make it runnable.
    pub fn from_model(model: TypedModel) -> Result<Self> {
        let model = model.into_optimized()?;

        // Everything after the batch axis counts as class scores
        let output_len = model
            .output_fact(0)?
            .shape
            .as_concrete()
            .map(|dims| dims.iter().skip(1).product());

        Ok(Self {
            model: model.into_runnable()?,
            output_len,
        })
    }
}

/// NHWC input shape with a batch of one.
pub fn input_shape(width: u32, height: u32) -> TVec<usize> {
    tvec!(1, height as usize, width as usize, 3)
}

impl Classifier for OnnxClassifier {
    fn output_len(&self) -> Option<usize> {
        self.output_len
    }

    fn predict(&self, batch: Array4<f32>) -> Result<Vec<f32>> {
        let input: Tensor = batch.into();
        let raw_nn_out = self.model.run(tvec!(input.into()))?;

        let scores = raw_nn_out[0]
            .to_array_view::<f32>()?
            .iter()
            .cloned()
            .collect();

        Ok(scores)
    }
}

/// Index of the highest score.
///
/// Ties resolve to the lowest index and NaN scores are never selected. Returns `None` when there
/// is nothing to compare.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => (),
            _ => best = Some((index, score)),
        }
    }

    best.map(|(index, _)| index)
}
