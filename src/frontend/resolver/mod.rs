//! Layout resolver. Resolves operand types against the catalog and the declared enum maps, validates
//! modifiers and computes per-operand wire widths and per-opcode fixed sizes.

pub mod error;
pub mod resolved;

use tracing::debug;
use crate::prelude::*;
use crate::config::{Config, MAX_OPCODE, MAX_OPERANDS};
use crate::frontend::ast::{EnumMapEntry, Line, OpcodeEntry, Operand, ParsedProgram};
use crate::shared::catalog::{Catalog, CatalogEntry, Scalar};
use crate::shared::typed_ids::EnumMapId;
use error::{ResolveError, ResolveErrorKind, ResolveResult};
use resolved::*;

/// Type token for untyped handles.
pub const ANY: &str = "any";

/// Names that enum maps may not shadow besides the catalog types.
const RESERVED_TYPE_NAMES: [ &str; 2 ] = [ ANY, "memop" ];

/// Tracks names within one namespace and reports the second declaration of a name.
struct Names<'a>(UnorderedMap<&'a str, Line>);

impl<'a> Names<'a> {
    fn new() -> Self {
        Names(UnorderedMap::new())
    }
    fn declare(self: &mut Self, name: &'a str, line: Line) -> ResolveResult {
        if self.0.insert(name, line).is_some() {
            Err(ResolveError::new(ResolveErrorKind::DuplicateDeclaration(name.to_string()), line))
        } else {
            Ok(())
        }
    }
}

fn resolve_enum_map(id: EnumMapId, entry: EnumMapEntry) -> ResolveResult<ResolvedEnumMap> {
    let underlying = Scalar::from_name(&entry.underlying)
        .filter(|scalar| scalar.is_integer())
        .ok_or_else(|| ResolveError::new(ResolveErrorKind::InvalidUnderlyingType(entry.underlying.clone()), entry.line))?;
    if entry.members.is_empty() {
        return Err(ResolveError::new(ResolveErrorKind::EmptyEnumMap(entry.type_name), entry.line));
    }
    if entry.members.len() as u64 > underlying.index_capacity() {
        return Err(ResolveError::new(ResolveErrorKind::EnumOverflow(entry.type_name), entry.line));
    }
    let mut members = Names::new();
    for member in &entry.members {
        members.declare(&member.name, member.line)?;
    }
    Ok(ResolvedEnumMap {
        id,
        type_name   : entry.type_name,
        underlying,
        native_type : entry.native_type,
        members     : entry.members,
        line        : entry.line,
    })
}

fn resolve_enum_maps(entries: Vec<EnumMapEntry>, catalog: &Catalog) -> ResolveResult<Vec<ResolvedEnumMap>> {
    let mut names = Names::new();
    for entry in &entries {
        if catalog.lookup(&entry.type_name).is_some() || RESERVED_TYPE_NAMES.contains(&entry.type_name.as_str()) {
            return Err(ResolveError::new(ResolveErrorKind::DuplicateDeclaration(entry.type_name.clone()), entry.line));
        }
        names.declare(&entry.type_name, entry.line)?;
    }
    entries.into_iter().enumerate().map(|(index, entry)| resolve_enum_map(index.into(), entry)).collect()
}

/// Resolves operand types of a single opcode.
struct OperandResolver<'a> {
    catalog     : &'a Catalog,
    enum_maps   : &'a [ ResolvedEnumMap ],
}

impl<'a> OperandResolver<'a> {
    fn kind(self: &Self, type_name: &str, line: Line) -> ResolveResult<OperandKind> {
        if type_name == ANY {
            return Ok(OperandKind::Any);
        }
        match self.catalog.lookup(type_name) {
            Some(CatalogEntry::Scalar(scalar)) => Ok(OperandKind::Scalar(scalar)),
            Some(CatalogEntry::Heap(heap_type_id)) => Ok(OperandKind::Heap(heap_type_id)),
            None => self.enum_maps.iter()
                .find(|enum_map| enum_map.type_name == type_name)
                .map(|enum_map| OperandKind::Enum(enum_map.id))
                .ok_or_else(|| ResolveError::new(ResolveErrorKind::UnknownType(type_name.to_string()), line)),
        }
    }

    fn operand(self: &Self, operand: Operand, line: Line) -> ResolveResult<ResolvedOperand> {
        let kind = self.kind(&operand.type_name, line)?;
        if operand.is_nullable && !operand.is_memory {
            return Err(ResolveError::new(ResolveErrorKind::NullableImmediate(operand.binding), line));
        }
        let wire = match (operand.is_memory, kind) {
            (true, _) => Wire::Handle,
            (false, OperandKind::Scalar(scalar)) => Wire::Scalar(scalar),
            (false, OperandKind::Enum(enum_map_id)) => Wire::Scalar(self.enum_maps[enum_map_id.into_usize()].underlying),
            (false, OperandKind::Heap(_)) | (false, OperandKind::Any) => {
                return Err(ResolveError::new(ResolveErrorKind::IllegalImmediate(operand.type_name), line));
            }
        };
        Ok(ResolvedOperand {
            type_name   : operand.type_name,
            kind,
            wire,
            is_memory   : operand.is_memory,
            is_nullable : operand.is_nullable,
            binding     : operand.binding,
        })
    }

    fn opcode(self: &Self, index: usize, entry: OpcodeEntry) -> ResolveResult<ResolvedOpcode> {
        let line = entry.line;
        if entry.code > MAX_OPCODE {
            return Err(ResolveError::new(ResolveErrorKind::TooManyOpcodes(entry.code), line));
        }
        if entry.operands.len() > MAX_OPERANDS {
            return Err(ResolveError::new(ResolveErrorKind::TooManyOperands(entry.name), line));
        }
        let mut bindings = Names::new();
        for operand in &entry.operands {
            bindings.declare(&operand.binding, line)?;
        }
        let operands = entry.operands.into_iter()
            .map(|operand| self.operand(operand, line))
            .collect::<ResolveResult<Vec<_>>>()?;
        Ok(ResolvedOpcode {
            id              : index.into(),
            fixed_size      : fixed_size(&operands),
            name            : entry.name,
            code            : entry.code,
            is_annotation   : entry.is_annotation,
            operands,
            body            : entry.body,
            description     : entry.description,
            line,
        })
    }
}

/// Resolves all operand types of the given parsed program and computes its wire layout.
///
/// Fails on the first unknown type, illegal modifier or duplicate declaration, and on reserved opcodes
/// declaring operands.
pub fn resolve(program: ParsedProgram, config: &Config) -> ResolveResult<ResolvedProgram> {
    let ParsedProgram { opcodes, enum_maps } = program;
    let enum_maps = resolve_enum_maps(enum_maps, &config.catalog)?;

    let mut names = Names::new();
    for entry in &opcodes {
        names.declare(&entry.name, entry.line)?;
    }

    let resolver = OperandResolver { catalog: &config.catalog, enum_maps: &enum_maps };
    let opcodes = opcodes.into_iter()
        .enumerate()
        .map(|(index, entry)| resolver.opcode(index, entry))
        .collect::<ResolveResult<Vec<_>>>()?;

    let reserved = [ &config.reserved.terminate, &config.reserved.next_buffer ];
    if let Some(opcode) = opcodes.iter().find(|opcode| reserved.contains(&&opcode.name) && !opcode.operands.is_empty()) {
        return Err(ResolveError::new(ResolveErrorKind::ReservedOperands(opcode.name.clone()), opcode.line));
    }

    debug!(opcodes = opcodes.len(), enum_maps = enum_maps.len(), "resolved wire layout");
    Ok(ResolvedProgram { opcodes, enum_maps, catalog: config.catalog.clone() })
}
