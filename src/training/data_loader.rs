use crate::error::{Result, ValhookError};
use ndarray::{ArrayD, Axis, Slice};

/// One group of samples evaluated in a single inference call.
///
/// Components are ordered to match the graph's declared inputs. The leading
/// dimension of the first component is the batch size.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
	components: Vec<ArrayD<f32>>,
}

impl Batch {
	pub fn new(components: Vec<ArrayD<f32>>) -> Self {
		Self { components }
	}

	pub fn components(&self) -> &[ArrayD<f32>] {
		&self.components
	}

	pub fn num_components(&self) -> usize {
		self.components.len()
	}

	pub fn size(&self) -> Result<usize> {
		let first = self
			.components
			.first()
			.ok_or_else(|| ValhookError::BatchShape("Batch has no components".into()))?;
		let size = first.shape().first().copied().ok_or_else(|| {
			ValhookError::BatchShape("First batch component is a scalar, expected a leading batch dimension".into())
		})?;
		if size == 0 {
			return Err(ValhookError::BatchShape("Batch contains no samples".into()));
		}
		Ok(size)
	}
}

impl From<Vec<ArrayD<f32>>> for Batch {
	fn from(components: Vec<ArrayD<f32>>) -> Self {
		Batch::new(components)
	}
}

/// A finite, restartable source of validation batches.
///
/// Every `get_data` call starts again from the first batch and is
/// independent of any iterator handed out earlier.
pub trait Dataset {
	/// Number of batches yielded by one pass.
	fn size(&self) -> usize;

	fn get_data(&self) -> Box<dyn Iterator<Item = Batch> + '_>;
}

impl<D: Dataset + ?Sized> Dataset for Box<D> {
	fn size(&self) -> usize {
		(**self).size()
	}

	fn get_data(&self) -> Box<dyn Iterator<Item = Batch> + '_> {
		(**self).get_data()
	}
}

/// Dataset held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataset {
	batches: Vec<Batch>,
}

impl InMemoryDataset {
	pub fn new(batches: Vec<Batch>) -> Self {
		Self { batches }
	}

	/// Splits whole arrays into batches of `batch_size` along axis 0.
	///
	/// All arrays must share their leading dimension. The final batch holds
	/// the remainder and may be smaller.
	pub fn from_arrays(arrays: Vec<ArrayD<f32>>, batch_size: usize) -> Result<Self> {
		if batch_size == 0 {
			return Err(ValhookError::InvalidParameter(
				"Batch size must be greater than 0".into(),
			));
		}
		let total = match arrays.first() {
			Some(first) => leading_dim(first)?,
			None => {
				return Err(ValhookError::InvalidParameter(
					"At least one array is required".into(),
				))
			}
		};
		for (index, array) in arrays.iter().enumerate().skip(1) {
			let len = leading_dim(array)?;
			if len != total {
				return Err(ValhookError::BatchShape(format!(
					"Array {} has {} samples, expected {}",
					index, len, total
				)));
			}
		}

		let mut batches = Vec::with_capacity((total + batch_size - 1) / batch_size);
		let mut start = 0;
		while start < total {
			let end = (start + batch_size).min(total);
			let components = arrays
				.iter()
				.map(|array| array.slice_axis(Axis(0), Slice::from(start..end)).to_owned())
				.collect();
			batches.push(Batch::new(components));
			start = end;
		}

		Ok(Self { batches })
	}

	pub fn batches(&self) -> &[Batch] {
		&self.batches
	}
}

impl Dataset for InMemoryDataset {
	fn size(&self) -> usize {
		self.batches.len()
	}

	fn get_data(&self) -> Box<dyn Iterator<Item = Batch> + '_> {
		Box::new(self.batches.iter().cloned())
	}
}

fn leading_dim(array: &ArrayD<f32>) -> Result<usize> {
	array
		.shape()
		.first()
		.copied()
		.ok_or_else(|| ValhookError::BatchShape("Scalar arrays cannot be batched".into()))
}
