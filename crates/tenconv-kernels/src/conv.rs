//! 2D convolution with per-channel bias via im2col + GEMM
//!
//! # Pipeline
//!
//! ```text
//! image ──(same? pad)──► padded ──im2col──► patches (P × C·Fr·Fc)
//! filters ──flatten──► kernels (B × C·Fr·Fc)
//! bias ──broadcast──► result (P × B) += patches · kernelsᵀ
//! result ──reconstruct──► output (B, outRows, outCols)
//! ```
//!
//! Every stage is a pure transform that allocates its output. Any dimension
//! mismatch aborts the whole convolution; there is no partial result.

use crate::bias::bias_seeded_gemm;
use crate::error::{ConvError, ConvResult};
use crate::flatten::flatten_filters;
use crate::gemm::{ArrayGemm, Gemm};
use crate::im2col::{im2col, OutputDims};
use crate::reconstruct::reconstruct_image;
use scirs2_core::numeric::Float;
use std::borrow::Cow;
use tenconv_core::{BiasVector, FilterBank, ImageTensor, Margins};

/// Padding policy for [`ConvEngine::conv2d_add_channel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvPadding {
    /// No padding; output shrinks by `filter_size - 1` per dimension
    #[default]
    Valid,
    /// Zero-pad with [`Margins::same`] so the output keeps the input spatial size
    Same,
}

impl ConvPadding {
    /// Margins applied to the input for a kernel of the given size
    pub fn margins(self, filter_rows: usize, filter_cols: usize) -> Margins {
        match self {
            ConvPadding::Valid => Margins::default(),
            ConvPadding::Same => Margins::same(filter_rows, filter_cols),
        }
    }
}

impl From<bool> for ConvPadding {
    /// `true` selects same padding, `false` valid padding
    fn from(same: bool) -> Self {
        if same {
            ConvPadding::Same
        } else {
            ConvPadding::Valid
        }
    }
}

/// Convolution engine over an injected GEMM capability
///
/// # Examples
///
/// ```
/// use tenconv_core::{BiasVector, FilterBank, ImageTensor};
/// use tenconv_kernels::{ConvEngine, ConvPadding, ReferenceGemm};
///
/// let image = ImageTensor::from_vec(1, 3, 3, (1..=9).map(|v| v as f64).collect()).unwrap();
/// let filters = FilterBank::from_elem(1, 1, 2, 2, 1.0);
/// let bias = BiasVector::new(vec![0.0]);
///
/// let engine = ConvEngine::new(ReferenceGemm);
/// let out = engine
///     .conv2d_add_channel(&image, &filters, &bias, ConvPadding::Valid)
///     .unwrap();
/// assert_eq!(out.shape(), [1, 2, 2]);
/// assert_eq!(out.as_slice(), &[12.0, 16.0, 24.0, 28.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConvEngine<G = ArrayGemm> {
    gemm: G,
}

impl<G> ConvEngine<G> {
    /// Engine that multiplies through `gemm`
    pub fn new(gemm: G) -> Self {
        Self { gemm }
    }

    /// The injected GEMM
    pub fn gemm(&self) -> &G {
        &self.gemm
    }

    /// Convolve `image` with every kernel of `filters` and add the per-channel bias
    ///
    /// Output shape is `(filters.batches(), out_rows, out_cols)`, where the spatial size
    /// is computed from the (possibly padded) image: the input size for
    /// [`ConvPadding::Same`], `input - filter + 1` for [`ConvPadding::Valid`].
    ///
    /// # Errors
    ///
    /// - [`ConvError::BiasLengthMismatch`] if the bias length field is inconsistent
    /// - [`ConvError::BiasBatchMismatch`] if the bias length differs from `filters.batches()`
    /// - [`ConvError::ChannelMismatch`] if `filters.channels() != image.channels()`
    /// - [`ConvError::FilterDoesNotFit`] if the kernel is empty or larger than the padded image
    /// - any error reported by the GEMM or by reconstruction
    pub fn conv2d_add_channel<T>(
        &self,
        image: &ImageTensor<T>,
        filters: &FilterBank<T>,
        bias: &BiasVector<T>,
        padding: ConvPadding,
    ) -> ConvResult<ImageTensor<T>>
    where
        T: Float,
        G: Gemm<T>,
    {
        if !bias.is_consistent() {
            return Err(ConvError::BiasLengthMismatch {
                declared: bias.declared_len(),
                actual: bias.len(),
            });
        }
        if bias.len() != filters.batches() {
            return Err(ConvError::BiasBatchMismatch {
                bias: bias.len(),
                batches: filters.batches(),
            });
        }
        if filters.channels() != image.channels() {
            return Err(ConvError::ChannelMismatch {
                image: image.channels(),
                filter: filters.channels(),
            });
        }

        log::debug!(
            "conv2d_add_channel: image {:?}, filters {:?}, padding {:?}",
            image.shape(),
            filters.shape(),
            padding
        );

        let margins = padding.margins(filters.rows(), filters.cols());
        if !margins.is_symmetric() {
            log::debug!(
                "even {}x{} kernel: same padding puts the extra row/column at the bottom/right ({:?})",
                filters.rows(),
                filters.cols(),
                margins
            );
        }
        let padded: Cow<'_, ImageTensor<T>> = if margins.is_zero() {
            Cow::Borrowed(image)
        } else {
            Cow::Owned(image.zero_pad2d(margins))
        };

        let out = OutputDims::valid(padded.rows(), padded.cols(), filters.rows(), filters.cols())?;
        let patches = im2col(&padded, filters.rows(), filters.cols())?;
        let kernels = flatten_filters(filters)?;
        log::trace!(
            "im2col {:?} x flattened filters {:?} -> result ({}, {})",
            patches.matrix().shape(),
            kernels.matrix().shape(),
            out.positions(),
            filters.batches()
        );

        let result = bias_seeded_gemm(&self.gemm, &patches, &kernels, bias)?;
        reconstruct_image(&result, out)
    }
}

/// Convolve with the default ndarray-backed GEMM
///
/// `same` selects same padding (`true`) or valid padding (`false`). See
/// [`ConvEngine::conv2d_add_channel`] for shapes and errors.
///
/// # Examples
///
/// ```
/// use tenconv_core::{BiasVector, FilterBank, ImageTensor};
/// use tenconv_kernels::conv2d_add_channel;
///
/// let image = ImageTensor::<f64>::random_uniform(3, 8, 8, 0.0, 1.0, 1).unwrap();
/// let filters = FilterBank::<f64>::random_uniform(4, 3, 3, 3, -1.0, 1.0, 2).unwrap();
/// let bias = BiasVector::zeros(4);
///
/// let same = conv2d_add_channel(&image, &filters, &bias, true).unwrap();
/// assert_eq!(same.shape(), [4, 8, 8]);
/// let valid = conv2d_add_channel(&image, &filters, &bias, false).unwrap();
/// assert_eq!(valid.shape(), [4, 6, 6]);
/// ```
pub fn conv2d_add_channel<T>(
    image: &ImageTensor<T>,
    filters: &FilterBank<T>,
    bias: &BiasVector<T>,
    same: bool,
) -> ConvResult<ImageTensor<T>>
where
    T: Float + 'static,
{
    ConvEngine::<ArrayGemm>::default().conv2d_add_channel(image, filters, bias, same.into())
}
