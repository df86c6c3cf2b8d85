use spatia_image::ImageError;

/// A square 2D filter kernel with an odd side length.
///
/// The weights are stored row-major, `size * size` of them, so the kernel always
/// has a unique center at `(size / 2, size / 2)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from its side length and row-major weights.
    ///
    /// # Arguments
    ///
    /// * `size` - The side length of the kernel. Must be odd.
    /// * `data` - The `size * size` weights of the kernel.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidKernelSize`] if `size` is even or zero, and
    /// [`ImageError::InvalidKernelShape`] if `data` is not `size * size` long.
    ///
    /// # Example
    ///
    /// ```
    /// use spatia_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::new(3, vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    /// assert_eq!(kernel.size(), 3);
    /// assert_eq!(kernel.half_size(), 1);
    ///
    /// assert!(Kernel::new(2, vec![0.25; 4]).is_err());
    /// ```
    pub fn new(size: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        if size % 2 == 0 {
            return Err(ImageError::InvalidKernelSize(size));
        }
        if data.len() != size * size {
            return Err(ImageError::InvalidKernelShape(data.len(), size));
        }
        Ok(Self { size, data })
    }

    /// The side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The padding needed on each side of an image to convolve it, `size / 2`.
    pub fn half_size(&self) -> usize {
        self.size / 2
    }

    /// The weights of the kernel, row-major.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The weight at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(self.data[row * self.size + col])
    }

    /// The sum of all weights.
    ///
    /// Smoothing kernels sum to one and derivative kernels to zero.
    ///
    /// ```
    /// use spatia_imgproc::filter::kernels::{laplacian_kernel3, Kernel};
    ///
    /// let weights = vec![0.0, 0.0, 0.0, 0.25, 0.5, 0.25, 0.0, 0.0, 0.0];
    /// let smooth = Kernel::new(3, weights).unwrap();
    /// assert_eq!(smooth.sum(), 1.0);
    /// assert_eq!(laplacian_kernel3().sum(), 0.0);
    /// ```
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Return the kernel flipped along both axes.
    ///
    /// Row-major storage makes this a plain reversal of the weights.
    pub fn flipped(&self) -> Self {
        Self {
            size: self.size,
            data: self.data.iter().rev().copied().collect(),
        }
    }
}

fn check_gaussian_params(kernel_size: usize, sigma: f32) -> Result<(), ImageError> {
    if kernel_size % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(ImageError::InvalidSigma(sigma));
    }
    Ok(())
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel. Must be odd.
/// * `sigma` - The sigma of the gaussian kernel. Must be positive.
///
/// # Returns
///
/// A normalized vector of the kernel weights.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Result<Vec<f32>, ImageError> {
    check_gaussian_params(kernel_size, sigma)?;

    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    Ok(kernel)
}

/// Create a square 2D gaussian blur kernel.
///
/// The weight at offset `(dx, dy)` from the center is proportional to
/// `exp(-(dx² + dy²) / (2σ²))`, and the weights sum to one so the mean
/// brightness of a filtered image is preserved.
///
/// # Arguments
///
/// * `kernel_size` - The side length of the kernel. Must be odd.
/// * `sigma` - The sigma of the gaussian kernel. Must be positive.
///
/// # Example
///
/// ```
/// use spatia_imgproc::filter::kernels::gaussian_kernel_2d;
///
/// let kernel = gaussian_kernel_2d(5, 1.0).unwrap();
/// assert_eq!(kernel.size(), 5);
/// assert!((kernel.sum() - 1.0).abs() < 1e-6);
/// ```
pub fn gaussian_kernel_2d(kernel_size: usize, sigma: f32) -> Result<Kernel, ImageError> {
    let profile = gaussian_kernel_1d(kernel_size, sigma)?;

    // the 2D gaussian is separable: exp(-(dx² + dy²)) = exp(-dx²) * exp(-dy²)
    let mut data = Vec::with_capacity(kernel_size * kernel_size);
    for wy in profile.iter() {
        data.extend(profile.iter().map(|wx| wx * wy));
    }

    let norm = data.iter().sum::<f32>();
    data.iter_mut().for_each(|k| *k /= norm);

    Kernel::new(kernel_size, data)
}

/// Create the 3x3 laplacian kernel.
///
/// A discrete second derivative: center weight 4, the four edge-adjacent cells
/// -1 and the corners 0.
pub fn laplacian_kernel3() -> Kernel {
    Kernel {
        size: 3,
        data: vec![0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0],
    }
}

/// Create the 3x3 sobel kernels.
///
/// # Returns
///
/// The pair `(gx, gy)`. `gx` responds to vertical edges (horizontal change) and
/// `gy` to horizontal edges (vertical change).
pub fn sobel_kernels3() -> (Kernel, Kernel) {
    let gx = Kernel {
        size: 3,
        data: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
    };
    let gy = Kernel {
        size: 3,
        data: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
    };
    (gx, gy)
}
