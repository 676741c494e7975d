use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

// One note's playback handle. It never owns audio, it reads whichever buffer
// the engine currently holds, so swapping the buffer retargets every voice.
#[derive(Clone, Copy, Debug)]
pub struct Voice {
    pub pos: f64,
    pub pitch: f32,
    pub gain: f32,
    pub active: bool,
}

impl Voice {
    pub fn new(gain: f32) -> Self {
        Self {
            pos: 0.0,
            pitch: 1.0,
            gain,
            active: false,
        }
    }

    // start over from the first frame, whether or not we were still sounding
    pub fn restart(&mut self) {
        self.pos = 0.0;
        self.active = true;
    }

    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut [StereoFrame]) {
        // we're at a certain playback position, it's our job to mix this voice into the output buffer
        if !self.active {
            return;
        }
        let data = &buffer.data;
        let len = data.len();

        for frame in out.iter_mut() {
            // a buffer swap can leave us past the end of the new sample
            let i = self.pos as usize;
            if i >= len {
                self.active = false;
                break;
            }

            // read sample at current position
            let frac = (self.pos - i as f64) as f32;
            let s0 = data[i];
            let s1 = data.get(i + 1).copied().unwrap_or(s0);
            let sample = s0.lerp(s1, frac);

            // gain
            frame.left += sample.left * self.gain;
            frame.right += sample.right * self.gain;

            // advance position
            self.pos += self.pitch as f64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> SampleBuffer {
        SampleBuffer {
            data: (0..len)
                .map(|i| StereoFrame { left: i as f32, right: -(i as f32) })
                .collect(),
        }
    }

    #[test]
    fn idle_voice_adds_nothing() {
        let mut v = Voice::new(1.0);
        let mut out = [StereoFrame::zero(); 4];
        v.render_into(&ramp(8), &mut out);
        assert!(out.iter().all(|f| *f == StereoFrame::zero()));
    }

    #[test]
    fn native_pitch_reads_frame_by_frame() {
        let mut v = Voice::new(1.0);
        v.restart();
        let mut out = [StereoFrame::zero(); 3];
        v.render_into(&ramp(8), &mut out);
        assert_eq!(out[2], StereoFrame { left: 2.0, right: -2.0 });
        assert!(v.active);
    }

    #[test]
    fn half_pitch_interpolates() {
        let mut v = Voice::new(1.0);
        v.pitch = 0.5;
        v.restart();
        let mut out = [StereoFrame::zero(); 2];
        v.render_into(&ramp(8), &mut out);
        assert!((out[1].left - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stops_at_end_of_buffer() {
        let mut v = Voice::new(1.0);
        v.pitch = 2.0;
        v.restart();
        let mut out = [StereoFrame::zero(); 8];
        v.render_into(&ramp(4), &mut out);
        assert!(!v.active);
        // frames 0 and 2 were played, the rest stays silent
        assert_eq!(out[1].left, 2.0);
        assert_eq!(out[2], StereoFrame::zero());
    }

    #[test]
    fn gain_scales_output() {
        let mut v = Voice::new(0.5);
        v.restart();
        let mut out = [StereoFrame::zero(); 2];
        v.render_into(&ramp(4), &mut out);
        assert_eq!(out[1].left, 0.5);
    }
}
