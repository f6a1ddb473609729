use std::sync::Arc;

use anyhow::{bail, Result};

use crate::{
    error::PredictError,
    labels::ClassLabels,
    nn::{argmax, Classifier},
    preproc::preproc,
};

/// Runs uploaded images through the classifier and names the winning class.
pub struct Inferer {
    model: Arc<dyn Classifier>,
    labels: ClassLabels,
    width: u32,
    height: u32,
}

impl Inferer {
    /// Bind a model to its label table.
    ///
    /// Fails if the model declares an output size different from the number of labels. Models
    /// with a dynamic output shape are checked on every prediction instead.
    pub fn new(
        model: Arc<dyn Classifier>,
        labels: ClassLabels,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        match model.output_len() {
            Some(output_len) if output_len != labels.len() => bail!(
                "model produces {} scores but {} class labels are configured",
                output_len,
                labels.len()
            ),
            Some(_) => (),
            None => log::warn!("Model output size is dynamic, label count is checked per request"),
        }

        Ok(Self {
            model,
            labels,
            width,
            height,
        })
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    /// Classify one encoded image.
    pub fn infer(&self, bytes: &[u8]) -> Result<String, PredictError> {
        let batch = preproc(bytes, self.width, self.height)?;
        log::debug!("Input tensor shape {:?}", batch.shape());

        let scores = self.model.predict(batch).map_err(PredictError::Model)?;
        log::debug!("Scores {:?}", &scores);

        if scores.len() != self.labels.len() {
            return Err(PredictError::LabelMismatch {
                scores: scores.len(),
                labels: self.labels.len(),
            });
        }

        let index = argmax(&scores).ok_or(PredictError::InvalidOutput)?;
        self.labels
            .get(index)
            .map(ToOwned::to_owned)
            .ok_or(PredictError::InvalidOutput)
    }
}
