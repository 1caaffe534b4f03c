//! The fixed column set of the equipment table.
//!
//! The same nine columns, in the same order, are used for the backing table
//! header and for every exported report.

use shared::EquipmentRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentColumn {
    Kind,
    Department,
    Branch,
    Owner,
    Position,
    Name,
    Email,
    MaintenanceDate,
    MaintenanceTime,
}

impl EquipmentColumn {
    /// Canonical column order
    pub const ALL: [EquipmentColumn; 9] = [
        EquipmentColumn::Kind,
        EquipmentColumn::Department,
        EquipmentColumn::Branch,
        EquipmentColumn::Owner,
        EquipmentColumn::Position,
        EquipmentColumn::Name,
        EquipmentColumn::Email,
        EquipmentColumn::MaintenanceDate,
        EquipmentColumn::MaintenanceTime,
    ];

    /// Header text used in the backing table and in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            EquipmentColumn::Kind => "Tipo",
            EquipmentColumn::Department => "Departamento",
            EquipmentColumn::Branch => "Sucursal",
            EquipmentColumn::Owner => "Responsable",
            EquipmentColumn::Position => "Posicion",
            EquipmentColumn::Name => "Nombre de Equipo",
            EquipmentColumn::Email => "Correo",
            EquipmentColumn::MaintenanceDate => "Fecha de Mantenimiento",
            EquipmentColumn::MaintenanceTime => "Hora",
        }
    }

    /// Field name on [`EquipmentRecord`]
    pub fn field_name(&self) -> &'static str {
        match self {
            EquipmentColumn::Kind => "kind",
            EquipmentColumn::Department => "department",
            EquipmentColumn::Branch => "branch",
            EquipmentColumn::Owner => "owner",
            EquipmentColumn::Position => "position",
            EquipmentColumn::Name => "name",
            EquipmentColumn::Email => "email",
            EquipmentColumn::MaintenanceDate => "maintenance_date",
            EquipmentColumn::MaintenanceTime => "maintenance_time",
        }
    }

    pub fn value<'a>(&self, record: &'a EquipmentRecord) -> &'a str {
        match self {
            EquipmentColumn::Kind => &record.kind,
            EquipmentColumn::Department => &record.department,
            EquipmentColumn::Branch => &record.branch,
            EquipmentColumn::Owner => &record.owner,
            EquipmentColumn::Position => &record.position,
            EquipmentColumn::Name => &record.name,
            EquipmentColumn::Email => &record.email,
            EquipmentColumn::MaintenanceDate => &record.maintenance_date,
            EquipmentColumn::MaintenanceTime => &record.maintenance_time,
        }
    }

    pub fn set(&self, record: &mut EquipmentRecord, value: String) {
        match self {
            EquipmentColumn::Kind => record.kind = value,
            EquipmentColumn::Department => record.department = value,
            EquipmentColumn::Branch => record.branch = value,
            EquipmentColumn::Owner => record.owner = value,
            EquipmentColumn::Position => record.position = value,
            EquipmentColumn::Name => record.name = value,
            EquipmentColumn::Email => record.email = value,
            EquipmentColumn::MaintenanceDate => record.maintenance_date = value,
            EquipmentColumn::MaintenanceTime => record.maintenance_time = value,
        }
    }

    /// Resolve a header cell to a column.
    ///
    /// Matching ignores case, Spanish accents, surrounding whitespace and the
    /// difference between spaces and underscores, and accepts both the display
    /// name and the field name ("Posición", "POSICION", "position").
    pub fn from_header(header: &str) -> Option<Self> {
        let wanted = normalize_header(header);
        if wanted.is_empty() {
            return None;
        }

        Self::ALL.into_iter().find(|column| {
            normalize_header(column.display_name()) == wanted
                || normalize_header(column.field_name()) == wanted
        })
    }
}

fn normalize_header(header: &str) -> String {
    let folded: String = header
        .trim()
        .chars()
        .flat_map(|c| c.to_lowercase())
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            '_' | '-' => ' ',
            other => other,
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
