use crate::error::WeldError;
use crate::state::SolutionState;

/// Map the interior temperature onto the TURBO gradient, scaled between
/// the coldest and the hottest cell. Row 0 of the image is the surface.
pub fn temperature_image(state: &SolutionState) -> ::image::RgbImage {
    let cells = state.cells();
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for j in state.interior() {
        for i in state.interior() {
            let v = state.t[(i, j)];
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    let range = hi - lo;

    let gradient = colorous::TURBO;
    let mut img = ::image::RgbImage::new(cells as u32, cells as u32);
    for j in state.interior() {
        for i in state.interior() {
            let r = if range > 0.0 {
                ((state.t[(i, j)] - lo) / range).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let c = gradient.eval_continuous(r);
            img.put_pixel(
                (i - 1) as u32,
                (j - 1) as u32,
                ::image::Rgb(c.as_array()),
            );
        }
    }
    img
}

pub fn write_temperature_image<F: AsRef<std::path::Path>>(
    state: &SolutionState,
    s: &F,
) -> Result<(), WeldError> {
    log::debug!("Writing image: {:?}", s.as_ref());
    temperature_image(state).save(s)?;
    Ok(())
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn hot_spot_differs_from_background() {
        let mut state = SolutionState::new(4);
        state.t.fill(300.0);
        state.t[(2, 1)] = 2000.0;
        let img = temperature_image(&state);
        assert_eq!(img.dimensions(), (4, 4));
        let hot = img.get_pixel(1, 0);
        let cold = img.get_pixel(3, 3);
        assert_ne!(hot, cold);
        assert_eq!(
            *cold,
            ::image::Rgb(colorous::TURBO.eval_continuous(0.0).as_array())
        );
    }

    #[test]
    fn uniform_field_is_flat() {
        let mut state = SolutionState::new(2);
        state.t.fill(500.0);
        let img = temperature_image(&state);
        let first = *img.get_pixel(0, 0);
        assert!(img.pixels().all(|p| *p == first));
    }

    #[test]
    fn saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.png");
        let mut state = SolutionState::new(3);
        state.t.fill(300.0);
        write_temperature_image(&state, &path).unwrap();
        assert!(path.exists());
    }
}
