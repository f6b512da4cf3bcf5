use crate::error::{Result, ValhookError};
use tracing::debug;

/// Lifecycle hooks a training loop calls on its callbacks.
pub trait Callback {
	/// Called once before the first training step.
	fn before_train(&mut self) -> Result<()> {
		Ok(())
	}

	/// Performs the callback's action for the given global step.
	fn trigger(&mut self, global_step: u64) -> Result<()>;

	fn after_train(&mut self) {}

	fn name(&self) -> &str {
		"Callback"
	}
}

impl<C: Callback + ?Sized> Callback for Box<C> {
	fn before_train(&mut self) -> Result<()> {
		(**self).before_train()
	}

	fn trigger(&mut self, global_step: u64) -> Result<()> {
		(**self).trigger(global_step)
	}

	fn after_train(&mut self) {
		(**self).after_train()
	}

	fn name(&self) -> &str {
		(**self).name()
	}
}

/// Runs the wrapped callback on every `period`-th epoch.
///
/// Epochs are counted from 1, so a period of 1 fires at the end of every
/// epoch and a period of 3 fires after epochs 3, 6, 9, ...
#[derive(Debug)]
pub struct PeriodicCallback<C> {
	inner: C,
	period: usize,
	epoch: usize,
}

impl<C: Callback> PeriodicCallback<C> {
	pub fn new(inner: C, period: usize) -> Result<Self> {
		if period == 0 {
			return Err(ValhookError::InvalidParameter(
				"Period must be greater than 0".into(),
			));
		}
		Ok(Self { inner, period, epoch: 0 })
	}

	pub fn period(&self) -> usize {
		self.period
	}

	/// Epochs completed since `before_train`.
	pub fn epoch(&self) -> usize {
		self.epoch
	}

	pub fn inner(&self) -> &C {
		&self.inner
	}

	pub fn before_train(&mut self) -> Result<()> {
		self.epoch = 0;
		self.inner.before_train()
	}

	/// Marks the end of an epoch. Returns whether the inner callback ran.
	pub fn trigger_epoch(&mut self, global_step: u64) -> Result<bool> {
		self.epoch += 1;
		if self.epoch % self.period != 0 {
			return Ok(false);
		}
		debug!(callback = self.inner.name(), epoch = self.epoch, global_step, "Triggering callback");
		self.inner.trigger(global_step)?;
		Ok(true)
	}

	pub fn after_train(&mut self) {
		self.inner.after_train();
	}
}

/// Ordered set of periodic callbacks driven together.
#[derive(Default)]
pub struct CallbackGroup {
	callbacks: Vec<PeriodicCallback<Box<dyn Callback>>>,
}

impl CallbackGroup {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add<C: Callback + 'static>(&mut self, callback: C, period: usize) -> Result<()> {
		let boxed: Box<dyn Callback> = Box::new(callback);
		self.callbacks.push(PeriodicCallback::new(boxed, period)?);
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.callbacks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.callbacks.is_empty()
	}

	/// Stops at the first failing callback.
	pub fn before_train(&mut self) -> Result<()> {
		for callback in &mut self.callbacks {
			callback.before_train()?;
		}
		Ok(())
	}

	/// Returns how many callbacks fired. Stops at the first failing callback.
	pub fn trigger_epoch(&mut self, global_step: u64) -> Result<usize> {
		let mut fired = 0;
		for callback in &mut self.callbacks {
			if callback.trigger_epoch(global_step)? {
				fired += 1;
			}
		}
		Ok(fired)
	}

	pub fn after_train(&mut self) {
		for callback in &mut self.callbacks {
			callback.after_train();
		}
	}
}
