//! Markup event adapter.
//!
//! Walks an XML event stream and keeps an attribute context per open
//! element. Each context holds the element's own attributes and points at
//! its parent's, so lookups fall through to ancestors and the innermost
//! value wins. Only path-bearing elements reach the [`PathReceiver`].

use std::io::BufRead;
use std::rc::Rc;

use quick_xml::events::{BytesStart, Event};

use crate::cancel::CancelToken;
use crate::error::{EmbError, Result};
use crate::types::parse_color;

pub const ATTR_DATA: &str = "d";
pub const ATTR_FILL: &str = "fill";
pub const ATTR_HEIGHT: &str = "height";
pub const ATTR_POINTS: &str = "points";
pub const ATTR_STROKE: &str = "stroke";
pub const ATTR_STYLE: &str = "style";
pub const ATTR_VERSION: &str = "version";
pub const ATTR_VIEWBOX: &str = "viewBox";
pub const ATTR_WIDTH: &str = "width";

/// Attributes kept in the context; everything else is dropped.
const RETAINED_ATTRIBUTES: &[&str] = &[
    ATTR_DATA,
    ATTR_FILL,
    ATTR_HEIGHT,
    ATTR_POINTS,
    ATTR_STROKE,
    ATTR_VERSION,
    ATTR_VIEWBOX,
    ATTR_WIDTH,
];

pub const NAME_PATH: &str = "path";
pub const NAME_POLYLINE: &str = "polyline";

/// Receives the path-bearing elements of a document.
///
/// `on_start` is called once, then `on_path` zero or more times, then
/// exactly one of `on_finish` or `on_error`.
pub trait PathReceiver {
    fn on_start(&mut self) {}

    /// A path element's data and its resolved stroke colour.
    ///
    /// # Errors
    ///
    /// An error aborts the document; it is reported through `on_error`.
    fn on_path(&mut self, data: &str, stroke: u32) -> Result<()>;

    fn on_finish(&mut self) {}

    fn on_error(&mut self, _error: &EmbError) {}
}

/// Resolved attributes of one element, inheriting from its parent.
#[derive(Debug, Default)]
pub struct ElementContext {
    parent: Option<Rc<ElementContext>>,
    element: String,
    attributes: Vec<(String, String)>,
}

impl ElementContext {
    /// Child context of `parent` for an element named `element`.
    pub fn child(parent: &Rc<ElementContext>, element: impl Into<String>) -> Self {
        Self {
            parent: Some(Rc::clone(parent)),
            element: element.into(),
            attributes: Vec::new(),
        }
    }

    /// Qualified name of the element this context belongs to.
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Overlay a value. Later values for the same name win.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// Overlay the declarations of a `style` attribute.
    ///
    /// Declarations are separated by `;`, names from values by the first
    /// `:`. Declarations without a `:` are skipped.
    pub fn apply_style(&mut self, style: &str) {
        for declaration in style.split(';') {
            if let Some((name, value)) = declaration.split_once(':') {
                let name = name.trim();
                if !name.is_empty() {
                    self.set(name, value.trim());
                }
            }
        }
    }

    /// Look up a value on this element or its nearest ancestor.
    pub fn get(&self, name: &str) -> Option<&str> {
        let mut context = Some(self);
        while let Some(ctx) = context {
            if let Some((_, value)) = ctx.attributes.iter().rev().find(|(n, _)| n == name) {
                return Some(value);
            }
            context = ctx.parent.as_deref();
        }
        None
    }
}

/// An open element on the adapter's stack.
#[derive(Debug)]
struct Frame {
    context: Rc<ElementContext>,
    /// Last character data seen directly inside this element.
    text: Option<String>,
}

/// Drives a receiver from an XML document.
#[derive(Debug)]
pub struct ElementAdapter<'c, R> {
    receiver: R,
    cancel: &'c CancelToken,
    stack: Vec<Frame>,
}

impl<'c, R: PathReceiver> ElementAdapter<'c, R> {
    pub fn new(receiver: R, cancel: &'c CancelToken) -> Self {
        Self {
            receiver,
            cancel,
            stack: vec![Frame {
                context: Rc::new(ElementContext::default()),
                text: None,
            }],
        }
    }

    /// Parse the whole document, bracketing it with the receiver's
    /// start and finish/error callbacks.
    ///
    /// # Errors
    ///
    /// Returns the error that was passed to `on_error`.
    pub fn run<B: BufRead>(&mut self, input: B) -> Result<()> {
        self.receiver.on_start();
        match self.parse(input) {
            Ok(()) => {
                self.receiver.on_finish();
                Ok(())
            }
            Err(e) => {
                self.receiver.on_error(&e);
                Err(e)
            }
        }
    }

    /// Hand back the receiver.
    pub fn into_receiver(self) -> R {
        self.receiver
    }

    fn parse<B: BufRead>(&mut self, input: B) -> Result<()> {
        let mut reader = quick_xml::Reader::from_reader(input);
        let mut buf = Vec::new();
        let mut has_root = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    has_root = true;
                    self.start_element(&e)?;
                }
                Event::Empty(e) => {
                    has_root = true;
                    self.start_element(&e)?;
                    self.end_element();
                }
                Event::End(_) => self.end_element(),
                Event::Text(t) => self.characters(&String::from_utf8_lossy(&t)),
                Event::CData(t) => self.characters(&String::from_utf8_lossy(&t)),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        // quick-xml reports Eof for empty and truncated input.
        if !has_root {
            return Err(EmbError::Xml {
                message: "document has no root element".to_string(),
            });
        }
        if self.depth() > 0 {
            return Err(EmbError::Xml {
                message: format!("unexpected end of document, {} element(s) still open", self.depth()),
            });
        }

        Ok(())
    }

    fn start_element(&mut self, e: &BytesStart<'_>) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(EmbError::Cancelled);
        }

        let qname = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let parent = &self.stack[self.stack.len() - 1].context;
        let mut context = ElementContext::child(parent, qname);

        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            if key == ATTR_STYLE {
                context.apply_style(&attr.unescape_value()?);
            } else if RETAINED_ATTRIBUTES.contains(&key.as_str()) {
                context.set(key, attr.unescape_value()?.into_owned());
            }
        }

        let local = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
        let context = Rc::new(context);
        self.stack.push(Frame {
            context: Rc::clone(&context),
            text: None,
        });

        match local.as_str() {
            NAME_PATH => {
                if let Some(data) = context.get(ATTR_DATA) {
                    let stroke = parse_color(context.get(ATTR_STROKE));
                    self.receiver.on_path(data, stroke)?;
                }
            }
            NAME_POLYLINE => {
                if let Some(points) = context.get(ATTR_POINTS) {
                    let stroke = parse_color(context.get(ATTR_STROKE));
                    self.receiver.on_path(&format!("M{}", points), stroke)?;
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn end_element(&mut self) {
        // The root frame is never popped, even for stray end tags.
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    fn characters(&mut self, text: &str) {
        if let Some(frame) = self.stack.last_mut() {
            frame.text = Some(text.to_string());
        }
    }

    /// Character data of the innermost open element.
    pub fn current_text(&self) -> Option<&str> {
        self.stack.last().and_then(|f| f.text.as_deref())
    }

    /// Number of open elements.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }
}
