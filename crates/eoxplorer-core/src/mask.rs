use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CIRRUS_BIT, DEFAULT_CLOUD_BIT, DEFAULT_QA_BAND, PARALLEL_PIXEL_THRESHOLD,
};
use crate::error::{EoError, Result};
use crate::raster::{Raster, NO_DATA};
use crate::scene::Scene;

/// Which QA band and bit positions flag cloudy pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaskBits {
    pub qa_band: String,
    pub cloud_bit: u8,
    pub cirrus_bit: u8,
}

impl Default for MaskBits {
    fn default() -> Self {
        Self {
            qa_band: DEFAULT_QA_BAND.to_string(),
            cloud_bit: DEFAULT_CLOUD_BIT,
            cirrus_bit: DEFAULT_CIRRUS_BIT,
        }
    }
}

impl MaskBits {
    pub fn new(qa_band: impl Into<String>, cloud_bit: u8, cirrus_bit: u8) -> Result<Self> {
        let bits = Self {
            qa_band: qa_band.into(),
            cloud_bit,
            cirrus_bit,
        };
        bits.validate()?;
        Ok(bits)
    }

    /// Both bits must address a 16-bit QA word.
    pub fn validate(&self) -> Result<()> {
        if self.cloud_bit >= 16 || self.cirrus_bit >= 16 {
            return Err(EoError::InvalidMaskBits {
                cloud: self.cloud_bit,
                cirrus: self.cirrus_bit,
            });
        }
        Ok(())
    }

    fn cloud_mask_word(&self) -> u16 {
        1 << self.cloud_bit
    }

    fn cirrus_mask_word(&self) -> u16 {
        1 << self.cirrus_bit
    }
}

/// True when neither the cloud nor the cirrus flag is set in `qa`.
#[inline]
pub fn is_clear(qa: u16, bits: &MaskBits) -> bool {
    qa & bits.cloud_mask_word() == 0 && qa & bits.cirrus_mask_word() == 0
}

/// Per-pixel validity field. `true` = clear observation.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    pub data: Array2<bool>,
}

impl Mask {
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.data[[row, col]]
    }

    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }
}

/// Compute the clear-sky mask of a scene from its QA band.
pub fn cloud_mask(scene: &Scene, bits: &MaskBits) -> Result<Mask> {
    bits.validate()?;
    let qa = scene.require_band(&bits.qa_band)?;
    Ok(mask_from_qa(qa, bits))
}

/// Like [`is_clear`] for a QA sample stored as f32.
///
/// NaN, negative, or out-of-range samples carry no usable flags and are
/// never clear.
#[inline]
pub fn is_clear_sample(qa: f32, bits: &MaskBits) -> bool {
    if !qa.is_finite() || qa < 0.0 || qa > u16::MAX as f32 {
        return false;
    }
    is_clear(qa as u16, bits)
}

/// Bit test over a whole QA band. QA samples are whole numbers stored as f32.
pub fn mask_from_qa(qa: &Array2<f32>, bits: &MaskBits) -> Mask {
    let (h, w) = qa.dim();
    let test = |&v: &f32| is_clear_sample(v, bits);
    let data = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        Zip::from(qa).par_map_collect(test)
    } else {
        Zip::from(qa).map_collect(test)
    };
    Mask { data }
}

/// Replace out-of-mask values with [`NO_DATA`] in every band except `skip`.
pub fn apply_mask(raster: &mut Raster, mask: &Mask, skip: &str) -> Result<()> {
    if mask.shape() != raster.shape() {
        return Err(EoError::ShapeMismatch {
            expected: raster.shape(),
            actual: mask.shape(),
        });
    }
    for (name, data) in raster.bands_mut() {
        if name == skip {
            continue;
        }
        Zip::from(data).and(&mask.data).for_each(|v, &valid| {
            if !valid {
                *v = NO_DATA;
            }
        });
    }
    Ok(())
}
