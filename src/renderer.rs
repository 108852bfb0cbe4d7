//! The boundary towards drawing backends.
//!
//! The engine hands a finished, z-sorted command slice to a [`Renderer`] and
//! never looks at the outcome. Backends that keep a scissor stack can use
//! [`validate_clip_nesting`] to reject malformed streams up front.

use crate::errors::ClipNestingError;
use crate::render_commands::RenderCommand;

pub trait Renderer<CustomElementData> {
    type Error;

    fn render(&mut self, commands: &[RenderCommand<CustomElementData>]) -> Result<(), Self::Error>;
}

/// Checks that clip starts and ends pair up with stack discipline.
///
/// Returns the deepest nesting seen.
pub fn validate_clip_nesting<CustomElementData>(
    commands: &[RenderCommand<CustomElementData>],
) -> Result<usize, ClipNestingError> {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    for (index, command) in commands.iter().enumerate() {
        if command.is_clip_start() {
            depth += 1;
            deepest = deepest.max(depth);
        } else if command.is_clip_end() {
            depth = depth
                .checked_sub(1)
                .ok_or(ClipNestingError::UnmatchedEnd { index })?;
        }
    }
    if depth != 0 {
        return Err(ClipNestingError::Unclosed { depth });
    }
    Ok(deepest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::BoundingBox;
    use crate::render_commands::RenderCommandConfig;

    fn command(config: RenderCommandConfig<()>) -> RenderCommand<()> {
        RenderCommand {
            bounding_box: BoundingBox::default(),
            config,
            id: 0,
            z_index: 0,
            user_data: 0,
        }
    }

    fn start() -> RenderCommand<()> {
        command(RenderCommandConfig::ClipStart {
            horizontal: true,
            vertical: true,
        })
    }

    fn end() -> RenderCommand<()> {
        command(RenderCommandConfig::ClipEnd)
    }

    #[test]
    fn balanced_streams_report_depth() {
        assert_eq!(validate_clip_nesting::<()>(&[]), Ok(0));
        let commands = [start(), start(), end(), start(), end(), end()];
        assert_eq!(validate_clip_nesting(&commands), Ok(2));
    }

    #[test]
    fn stray_end_is_reported_at_its_index() {
        let commands = [start(), end(), end()];
        assert_eq!(
            validate_clip_nesting(&commands),
            Err(ClipNestingError::UnmatchedEnd { index: 2 })
        );
    }

    #[test]
    fn unclosed_start_is_reported() {
        let commands = [start(), start(), end()];
        assert_eq!(
            validate_clip_nesting(&commands),
            Err(ClipNestingError::Unclosed { depth: 1 })
        );
    }

    struct Recorder {
        frames: Vec<usize>,
    }

    impl Renderer<()> for Recorder {
        type Error = ClipNestingError;

        fn render(&mut self, commands: &[RenderCommand<()>]) -> Result<(), Self::Error> {
            validate_clip_nesting(commands)?;
            self.frames.push(commands.len());
            Ok(())
        }
    }

    #[test]
    fn renderer_rejects_malformed_frames() {
        let mut recorder = Recorder { frames: Vec::new() };
        recorder.render(&[start(), end()]).unwrap();
        assert!(recorder.render(&[end()]).is_err());
        assert_eq!(recorder.frames, vec![2]);
    }
}
